//! Progression tracking against real files: persistence across tracker
//! instances, capacity eviction, quiz attachment, and recovery from
//! corrupt documents.

use chrono::NaiveDate;
use learnforge::adapters::JsonFileStore;
use learnforge::models::LearningModule;
use learnforge::progress::{Ledger, ProgressTracker, MAX_ENTRIES};
use learnforge::traits::ProgressStore;
use std::path::Path;
use tempfile::TempDir;

fn tracker_at(path: &Path) -> ProgressTracker {
    ProgressTracker::new(Box::new(JsonFileStore::new(path)))
}

#[test]
fn test_ledger_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");

    let tracker = tracker_at(&path);
    tracker.record("Rust", LearningModule::Text, Some("Interview Ready".to_string()));
    drop(tracker);

    let reloaded = tracker_at(&path).read();
    assert_eq!(reloaded.entries.len(), 1);
    assert_eq!(reloaded.entries[0].topic, "Rust");
    assert_eq!(reloaded.entries[0].module, LearningModule::Text);
    assert_eq!(
        reloaded.entries[0].depth,
        Some("Interview Ready".to_string())
    );
    assert_eq!(reloaded.streak, 1);
}

#[test]
fn test_store_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("progression.json");

    tracker_at(&path).record("Rust", LearningModule::Code, None);
    assert!(path.exists());
}

#[test]
fn test_eviction_cap_through_real_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");
    let tracker = tracker_at(&path);

    for i in 0..=MAX_ENTRIES {
        tracker.record(format!("topic-{}", i), LearningModule::Text, None);
    }

    let ledger = tracker_at(&path).read();
    assert_eq!(ledger.entries.len(), MAX_ENTRIES);
    assert_eq!(ledger.entries[0].topic, "topic-1");
}

#[test]
fn test_quiz_result_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");

    let tracker = tracker_at(&path);
    tracker.record("SQL", LearningModule::Text, Some("Quick Summary".to_string()));
    tracker.record_quiz_result("SQL", 3, 4);

    let reloaded = tracker_at(&path).read();
    let score = reloaded.entries[0].quiz_score.as_ref().unwrap();
    assert_eq!((score.correct, score.total), (3, 4));
    assert_eq!(tracker_at(&path).stats().quizzes_taken, 1);
}

#[test]
fn test_corrupt_document_degrades_and_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");
    std::fs::write(&path, "{ not json").unwrap();

    let tracker = tracker_at(&path);
    assert!(tracker.read().entries.is_empty());

    // The next record overwrites the broken document.
    tracker.record("Rust", LearningModule::Text, None);
    let reloaded = tracker_at(&path).read();
    assert_eq!(reloaded.entries.len(), 1);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn test_stale_streak_reads_zero_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");

    let stale = Ledger {
        entries: Vec::new(),
        streak: 5,
        last_active_date: Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
    };
    let store = JsonFileStore::new(&path);
    store.save(&serde_json::to_string(&stale).unwrap()).unwrap();

    let tracker = tracker_at(&path);
    assert_eq!(tracker.read().streak, 0);
    assert_eq!(tracker.stats().streak, 0);
}

#[test]
fn test_document_shape_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");

    tracker_at(&path).record("Rust", LearningModule::Text, Some("Quick Summary".to_string()));

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(doc["lastActiveDate"].is_string());
    assert!(doc["streak"].is_u64());
    let entry = &doc["entries"][0];
    assert_eq!(entry["topic"], "Rust");
    assert_eq!(entry["module"], "text");
    assert_eq!(entry["depth"], "Quick Summary");
    assert!(entry["timestamp"].is_i64());
    // No score yet, so the field is omitted entirely.
    assert!(entry.get("quizScore").is_none());
}

#[test]
fn test_recent_topics_through_tracker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progression.json");
    let tracker = tracker_at(&path);

    tracker.record("A", LearningModule::Text, None);
    tracker.record("B", LearningModule::Code, None);
    tracker.record("A", LearningModule::Text, None);
    tracker.record("C", LearningModule::Audio, None);

    let recent = tracker.recent_topics(3);
    let pairs: Vec<(&str, LearningModule)> = recent
        .iter()
        .map(|item| (item.topic.as_str(), item.module))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("C", LearningModule::Audio),
            ("A", LearningModule::Text),
            ("B", LearningModule::Code),
        ]
    );
}
