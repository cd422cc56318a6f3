//! In-memory progression store for testing.

use std::sync::Mutex;

use crate::traits::{ProgressStore, StoreError};

/// Progression store holding its document in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a document.
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }
}

impl ProgressStore for InMemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        *slot = Some(raw.to_string());
        Ok(())
    }
}
