//! The progression ledger and its date arithmetic.
//!
//! The ledger is a size-bounded log of learning activity plus a daily
//! streak. All operations take the relevant date or instant as an
//! argument, so the rules stay deterministic under test; the tracker
//! layer supplies wall-clock time.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::LearningModule;
use crate::progress::entry::{ProgressionEntry, QuizScore};

/// Entries kept before the oldest are evicted.
pub const MAX_ENTRIES: usize = 200;

/// How many recent topics surface by default.
pub const RECENT_TOPICS_DEFAULT_LIMIT: usize = 8;

/// A distinct (topic, module) pair from the recency scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTopic {
    pub topic: String,
    pub module: LearningModule,
}

/// Aggregates derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    pub unique_topics: usize,
    pub coding_problems: usize,
    pub quizzes_taken: usize,
    pub streak: u32,
    pub total_sessions: usize,
}

/// The durable log of learning activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub entries: Vec<ProgressionEntry>,
    #[serde(default)]
    pub streak: u32,
    #[serde(
        default,
        rename = "lastActiveDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_active_date: Option<NaiveDate>,
}

impl Ledger {
    /// Append an entry recorded at `now`, updating the streak first.
    ///
    /// Recording on the same calendar day leaves the streak unchanged;
    /// on the day after the previous activity it increments; any larger
    /// gap (or a first-ever record) resets it to 1. The UTC calendar
    /// day decides adjacency.
    pub fn record_at(
        &mut self,
        topic: impl Into<String>,
        module: LearningModule,
        depth: Option<String>,
        now: DateTime<Utc>,
    ) {
        let today = now.date_naive();
        self.streak = match self.last_active_date {
            Some(last) if last == today => self.streak,
            Some(last) if today.pred_opt() == Some(last) => self.streak + 1,
            _ => 1,
        };
        self.last_active_date = Some(today);

        self.entries.push(ProgressionEntry {
            topic: topic.into(),
            module,
            timestamp: now.timestamp_millis(),
            depth,
            quiz_score: None,
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    /// The streak as of `today`, without mutating the stored value.
    ///
    /// A streak is only live while the last activity was today or
    /// yesterday; anything older reads as 0.
    pub fn corrected_streak_at(&self, today: NaiveDate) -> u32 {
        match self.last_active_date {
            Some(last) if last == today || today.pred_opt() == Some(last) => self.streak,
            _ => 0,
        }
    }

    /// Up to `limit` most recent distinct (topic, module) pairs,
    /// newest first.
    pub fn recent_topics(&self, limit: usize) -> Vec<RecentTopic> {
        let mut seen = HashSet::new();
        let mut recent = Vec::new();
        for entry in self.entries.iter().rev() {
            if recent.len() == limit {
                break;
            }
            if seen.insert((entry.topic.clone(), entry.module)) {
                recent.push(RecentTopic {
                    topic: entry.topic.clone(),
                    module: entry.module,
                });
            }
        }
        recent
    }

    /// Attach a quiz result to the most recent unscored text entry for
    /// `topic`. Returns whether an entry was found.
    pub fn record_quiz_result(&mut self, topic: &str, correct: u32, total: u32) -> bool {
        for entry in self.entries.iter_mut().rev() {
            if entry.topic == topic
                && entry.module == LearningModule::Text
                && entry.quiz_score.is_none()
            {
                entry.quiz_score = Some(QuizScore { correct, total });
                return true;
            }
        }
        false
    }

    /// Derive the aggregate stats as of `today`.
    pub fn stats_at(&self, today: NaiveDate) -> LedgerStats {
        let unique_topics = self
            .entries
            .iter()
            .map(|entry| entry.topic.as_str())
            .collect::<HashSet<_>>()
            .len();
        LedgerStats {
            unique_topics,
            coding_problems: self
                .entries
                .iter()
                .filter(|entry| entry.module == LearningModule::Code)
                .count(),
            quizzes_taken: self
                .entries
                .iter()
                .filter(|entry| entry.quiz_score.is_some())
                .count(),
            streak: self.corrected_streak_at(today),
            total_sessions: self.entries.len(),
        }
    }
}
