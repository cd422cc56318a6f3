//! Persistence abstraction for the progression ledger.
//!
//! The ledger is stored as one raw JSON document under a fixed key, so
//! the trait surface is deliberately small: load the document if it
//! exists, or replace it wholesale.

use thiserror::Error;

/// Errors surfaced by a [`ProgressStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Abstraction over the durable slot holding the serialized ledger.
pub trait ProgressStore: Send + Sync {
    /// Load the stored document, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored document.
    fn save(&self, raw: &str) -> Result<(), StoreError>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        (**self).save(raw)
    }
}
