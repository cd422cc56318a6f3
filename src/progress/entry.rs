//! Ledger entry types.

use serde::{Deserialize, Serialize};

use crate::models::LearningModule;

/// Result of a quiz, attached to the text entry it tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

/// One recorded piece of learning activity.
///
/// Immutable once appended, except that a quiz result may later be
/// attached to an unscored text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    pub topic: String,
    pub module: LearningModule,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(
        default,
        rename = "quizScore",
        skip_serializing_if = "Option::is_none"
    )]
    pub quiz_score: Option<QuizScore>,
}
