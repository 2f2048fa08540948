use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

use crate::error::TypedIdError;

/// Receives generated source artifacts. Implementations must accept
/// concurrent calls; every artifact of a pass has a distinct name.
pub trait ArtifactSink: Sync {
    fn add_source(&self, name: &str, text: String) -> Result<(), TypedIdError>;
}

/// In-memory artifact sink, sorted by artifact name.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    inner: Mutex<BTreeMap<String, String>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.inner.into_inner()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.lock().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl ArtifactSink for ArtifactStore {
    fn add_source(&self, name: &str, text: String) -> Result<(), TypedIdError> {
        let mut map = self.inner.lock();
        if map.contains_key(name) {
            return Err(TypedIdError::DuplicateArtifact(name.to_string()));
        }
        map.insert(name.to_string(), text);
        Ok(())
    }
}

/// Cooperative cancellation flag shared between the driver and a pass.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), TypedIdError> {
        if self.is_cancelled() {
            Err(TypedIdError::Cancelled)
        } else {
            Ok(())
        }
    }
}
