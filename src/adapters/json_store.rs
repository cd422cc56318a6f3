//! File-backed progression store.
//!
//! Persists the serialized ledger as a single JSON document under the
//! user's data directory, mirroring the one-key storage model the
//! ledger was designed around.

use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::{ProgressStore, StoreError};

const APP_DIR: &str = "learnforge";
const LEDGER_FILE: &str = "progression.json";

/// Progression store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location,
    /// `<data dir>/learnforge/progression.json`. Falls back to the
    /// working directory when no user data directory exists.
    pub fn at_default_path() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR).join(LEDGER_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
