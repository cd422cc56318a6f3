//! Learning modality attached to requests and ledger entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The modality a piece of learning activity belongs to.
///
/// Serialized lowercase, matching the wire and storage convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningModule {
    Text,
    Code,
    Audio,
    Visual,
}

impl LearningModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningModule::Text => "text",
            LearningModule::Code => "code",
            LearningModule::Audio => "audio",
            LearningModule::Visual => "visual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Some(LearningModule::Text),
            "code" => Some(LearningModule::Code),
            "audio" => Some(LearningModule::Audio),
            "visual" => Some(LearningModule::Visual),
            _ => None,
        }
    }
}

impl fmt::Display for LearningModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
