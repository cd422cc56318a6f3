//! Load-modify-persist orchestration over a [`ProgressStore`].
//!
//! The tracker absorbs storage and parse failures: a broken or missing
//! document reads as an empty ledger, and a failed write is logged and
//! dropped. Recording progress must never take a session down.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::models::LearningModule;
use crate::progress::ledger::{Ledger, LedgerStats, RecentTopic};
use crate::traits::ProgressStore;

pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Record a completed session and persist the updated ledger.
    pub fn record(&self, topic: impl Into<String>, module: LearningModule, depth: Option<String>) {
        self.record_at(topic, module, depth, Utc::now());
    }

    pub(crate) fn record_at(
        &self,
        topic: impl Into<String>,
        module: LearningModule,
        depth: Option<String>,
        now: chrono::DateTime<Utc>,
    ) {
        let mut ledger = self.load_ledger();
        ledger.record_at(topic, module, depth, now);
        self.persist(&ledger);
    }

    /// Attach a quiz score to the most recent unscored text entry for
    /// `topic`. A result with no matching entry is dropped.
    pub fn record_quiz_result(&self, topic: &str, correct: u32, total: u32) {
        let mut ledger = self.load_ledger();
        if ledger.record_quiz_result(topic, correct, total) {
            self.persist(&ledger);
        } else {
            debug!(topic, "no unscored text entry for quiz result, dropping");
        }
    }

    /// The ledger with its streak corrected for today, read-only.
    pub fn read(&self) -> Ledger {
        self.read_at(Utc::now().date_naive())
    }

    pub(crate) fn read_at(&self, today: NaiveDate) -> Ledger {
        let mut ledger = self.load_ledger();
        // The stored streak may be stale; correct the copy without
        // writing anything back.
        ledger.streak = ledger.corrected_streak_at(today);
        ledger
    }

    pub fn recent_topics(&self, limit: usize) -> Vec<RecentTopic> {
        self.load_ledger().recent_topics(limit)
    }

    pub fn stats(&self) -> LedgerStats {
        self.stats_at(Utc::now().date_naive())
    }

    pub(crate) fn stats_at(&self, today: NaiveDate) -> LedgerStats {
        self.load_ledger().stats_at(today)
    }

    fn load_ledger(&self) -> Ledger {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ledger::default(),
            Err(err) => {
                warn!("failed to read progression ledger: {}", err);
                return Ledger::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!("failed to parse progression ledger: {}", err);
                Ledger::default()
            }
        }
    }

    fn persist(&self, ledger: &Ledger) {
        let raw = match serde_json::to_string_pretty(ledger) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to serialize progression ledger: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.save(&raw) {
            warn!("failed to write progression ledger: {}", err);
        }
    }
}
