//! Progression tracking: the durable ledger of learning activity,
//! streak arithmetic, and the tracker that ties it to a store.

pub mod entry;
pub mod ledger;
pub mod tracker;

pub use entry::{ProgressionEntry, QuizScore};
pub use ledger::{
    Ledger, LedgerStats, RecentTopic, MAX_ENTRIES, RECENT_TOPICS_DEFAULT_LIMIT,
};
pub use tracker::ProgressTracker;
