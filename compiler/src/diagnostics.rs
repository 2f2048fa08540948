use std::fmt;

use parking_lot::Mutex;
use serde::Serialize;
use typed_id_schema::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error   => "error",
        })
    }
}

/// Static description of a diagnostic kind. `message_format` holds one
/// `{0}` placeholder.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticDescriptor {
    pub id:             &'static str,
    pub title:          &'static str,
    pub message_format: &'static str,
    pub category:       &'static str,
    pub severity:       Severity,
}

pub static UNSUPPORTED_TYPE: DiagnosticDescriptor = DiagnosticDescriptor {
    id:             "TID0001",
    title:          "Unsupported underlying type",
    message_format: "The type '{0}' is not supported.",
    category:       "StronglyTypedId",
    severity:       Severity::Error,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub id:       &'static str,
    pub severity: Severity,
    pub message:  String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn create(descriptor: &'static DiagnosticDescriptor, location: Option<Location>, argument: &str) -> Self {
        Diagnostic {
            id:       descriptor.id,
            severity: descriptor.severity,
            message:  descriptor.message_format.replace("{0}", argument),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {} {}: {}", location, self.severity, self.id, self.message),
            None => write!(f, "{} {}: {}", self.severity, self.id, self.message),
        }
    }
}

/// Receives diagnostics from concurrently processed candidates.
pub trait DiagnosticSink: Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Unordered, thread-safe collection of reported diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    inner: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.inner.into_inner()
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }

    pub fn has_errors(&self) -> bool {
        self.snapshot().iter().any(|d| d.severity == Severity::Error)
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn report(&self, diagnostic: Diagnostic) {
        self.inner.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_interpolation_and_display() {
        let location = Location { file: "Ids.cs".into(), line: 3, column: 2 };
        let diagnostic = Diagnostic::create(&UNSUPPORTED_TYPE, Some(location), "object");
        assert_eq!(diagnostic.message, "The type 'object' is not supported.");
        assert_eq!(
            diagnostic.to_string(),
            "Ids.cs(3,2): error TID0001: The type 'object' is not supported."
        );
    }

    #[test]
    fn test_bag_collects_from_threads() {
        let bag = DiagnosticBag::new();
        std::thread::scope(|scope| {
            for i in 0..4 {
                let bag = &bag;
                scope.spawn(move || bag.report(Diagnostic::create(&UNSUPPORTED_TYPE, None, &i.to_string())));
            }
        });
        assert!(bag.has_errors());
        assert_eq!(bag.into_vec().len(), 4);
    }
}
