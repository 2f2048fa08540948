//! typed-id
//!
//! Entry point for running the strongly-typed id generator over a type graph.
//!
//! - `generate` / `generate_from_json` run a full pass and collect artifacts and diagnostics
//! - `check_graph` resolves annotations without emitting anything
//! - Re-exports of the compiler and type-graph crates

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

pub use typed_id_compiler::{
    attribute_source, ArtifactSink, ArtifactStore, CancellationToken, Diagnostic, DiagnosticBag, DiagnosticSink,
    GenerationSummary, Generator, GeneratorOptions, IdKind, Severity, TypedIdError, ATTRIBUTE_ARTIFACT_NAME,
};
pub use typed_id_schema::{verify_graph, SchemaError, TypeGraph, TypeKind};

use typed_id_compiler::{
    artifact_name, registry::collect_candidates, resolver::resolve_descriptors, types::Descriptor,
};

/// Everything one pass produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutput {
    pub artifacts:   BTreeMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn to_json(&self) -> Result<String, TypedIdError> {
        Ok(serde_json::to_string_pretty(self).map_err(SchemaError::from)?)
    }
}

/// Runs post-initialization and one pass over `graph`.
pub fn generate(graph: &TypeGraph, options: GeneratorOptions) -> Result<GenerationOutput, TypedIdError> {
    let generator = Generator::new(options);
    let diagnostics = DiagnosticBag::new();
    let artifacts = ArtifactStore::new();

    generator.post_initialize(&artifacts)?;
    generator.execute(graph, &diagnostics, &artifacts, &CancellationToken::new())?;

    let mut diagnostics = diagnostics.into_vec();
    diagnostics.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    Ok(GenerationOutput {
        artifacts: artifacts.into_map(),
        diagnostics,
    })
}

/// Decodes a JSON type graph and runs [generate] over it.
pub fn generate_from_json(json: &str, options: GeneratorOptions) -> Result<GenerationOutput, TypedIdError> {
    let graph = TypeGraph::from_json(json)?;
    generate(&graph, options)
}

/// Resolved annotations of one candidate declaration.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub qualified_name: String,
    pub declaration:    TypeKind,
    pub descriptors:    Vec<Descriptor>,
    /// Artifacts a pass would write, one per descriptor.
    pub artifacts:      Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub candidates:  Vec<CandidateReport>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Verifies `graph` and resolves every annotation without emitting code.
/// Candidates without a valid annotation are left out.
pub fn check_graph(graph: &TypeGraph) -> Result<CheckReport, TypedIdError> {
    verify_graph(graph)?;
    let bag = DiagnosticBag::new();

    let candidates = collect_candidates(graph)
        .iter()
        .filter_map(|candidate| {
            let descriptors = resolve_descriptors(graph, candidate, &bag);
            if descriptors.is_empty() {
                return None;
            }
            debug!("{}: {} annotation(s)", candidate.qualified_name, descriptors.len());
            Some(CandidateReport {
                qualified_name: candidate.qualified_name.clone(),
                declaration:    candidate.kind,
                artifacts:      (0..descriptors.len())
                    .map(|i| artifact_name(&candidate.qualified_name, i))
                    .collect(),
                descriptors,
            })
        })
        .collect();

    Ok(CheckReport {
        candidates,
        diagnostics: bag.into_vec(),
    })
}

pub mod compiler {
    pub use typed_id_compiler::*;
}

pub mod schema {
    pub use typed_id_schema::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{ "symbols": [
        { "name": "Shop", "kind": "namespace" },
        { "name": "CartId", "kind": "type", "declaration": "struct", "containing": 0,
          "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "Guid" }, true, true, true, true, true ] } ] },
        { "name": "Broken", "kind": "type", "declaration": "class", "containing": 0,
          "location": { "file": "Broken.cs", "line": 1, "column": 1 },
          "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "System.Uri" }, true, true, true, true, true ] } ] },
        { "name": "Plain", "kind": "type", "declaration": "class", "containing": 0 }
    ] }"#;

    #[test]
    fn test_generate_from_json_collects_artifacts_and_diagnostics() {
        let output = generate_from_json(GRAPH, GeneratorOptions::default()).unwrap();
        assert_eq!(
            output.artifacts.keys().collect::<Vec<_>>(),
            vec!["Shop.CartId.g.cs", "StronglyTypedIdAttribute.g.cs"]
        );
        assert!(output.has_errors());
        assert_eq!(output.diagnostics[0].message, "The type 'System.Uri' is not supported.");

        let json = output.to_json().unwrap();
        assert!(json.contains("\"TID0001\""));
        assert!(json.contains("\"Shop.CartId.g.cs\""));
    }

    #[test]
    fn test_check_graph_lists_annotated_candidates() {
        let graph = TypeGraph::from_json(GRAPH).unwrap();
        let report = check_graph(&graph).unwrap();
        assert_eq!(report.candidates.len(), 1);
        let cart = &report.candidates[0];
        assert_eq!(cart.qualified_name, "Shop.CartId");
        assert_eq!(cart.descriptors[0].kind, IdKind::Guid);
        assert_eq!(cart.artifacts, vec!["Shop.CartId.g.cs"]);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_a_schema_error() {
        let err = generate_from_json("{ \"symbols\": 3 }", GeneratorOptions::default()).unwrap_err();
        assert!(matches!(err, TypedIdError::Schema(SchemaError::Decode(_))));
    }
}
