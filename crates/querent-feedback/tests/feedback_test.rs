//! File-backed feedback store behaviour.

use std::sync::Arc;
use std::thread;

use querent_core::config::FeedbackConfig;
use querent_core::errors::PersistenceError;
use querent_core::models::{PerformanceLevel, Vote};
use querent_feedback::persistence;
use querent_feedback::FeedbackStore;

#[test]
fn three_down_votes_is_critical() {
    let store = FeedbackStore::in_memory(&FeedbackConfig::default());
    let q = "show revenue by month";
    let mut last = None;
    for _ in 0..3 {
        last = Some(store.record(q, "SELECT month FROM sales", Vote::Down).unwrap());
    }
    let metrics = last.unwrap();
    assert_eq!(metrics.performance_level, PerformanceLevel::Critical);
    assert_eq!(metrics.thumbs_down, 3);
    assert_eq!(metrics.success_rate, 0.0);
    assert!(metrics.warning.unwrap().contains("CRITICAL"));
}

#[test]
fn three_up_votes_is_excellent() {
    let store = FeedbackStore::in_memory(&FeedbackConfig::default());
    for _ in 0..3 {
        store.record("list customers", "SELECT * FROM customers", Vote::Up).unwrap();
    }
    let metrics = store.metrics_for("list customers");
    assert_eq!(metrics.performance_level, PerformanceLevel::Excellent);
    assert_eq!(metrics.success_rate, 1.0);
}

#[test]
fn reload_reproduces_scores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_data.json");
    let config = FeedbackConfig::default();

    {
        let store = FeedbackStore::open(&path, &config);
        store.record("Top 5 products", "SELECT 1", Vote::Up).unwrap();
        store.record("top 5 products", "SELECT 1", Vote::Down).unwrap();
        store.record("revenue", "SELECT 2", Vote::Up).unwrap();
    }

    let reopened = FeedbackStore::open(&path, &config);
    assert_eq!(reopened.len(), 3);
    let m = reopened.metrics_for("TOP 5 PRODUCTS");
    assert_eq!((m.thumbs_up, m.thumbs_down, m.total_feedback), (1, 1, 2));
    assert_eq!(reopened.events()[0].question, "Top 5 products");
}

#[test]
fn corrupt_log_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_data.json");
    std::fs::write(&path, "[{\"question\": ").unwrap();

    let store = FeedbackStore::open(&path, &FeedbackConfig::default());
    assert!(store.is_empty());

    store.record("q", "SELECT 1", Vote::Up).unwrap();
    assert_eq!(persistence::load_log(&path).len(), 1);
}

#[test]
fn legacy_log_with_naive_timestamps_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_data.json");
    std::fs::write(
        &path,
        r#"[
  {"question": "Show all customers", "sql_query": "SELECT * FROM customers;", "feedback": "up", "timestamp": "2024-02-15T10:11:12.123456"},
  {"question": "show all customers", "sql_query": "SELECT * FROM customers;", "feedback": "down", "timestamp": "2024-02-15T10:12:00.000001"}
]"#,
    )
    .unwrap();

    let store = FeedbackStore::open(&path, &FeedbackConfig::default());
    let m = store.metrics_for("show all customers");
    assert_eq!(m.thumbs_up, 1);
    assert_eq!(m.thumbs_down, 1);
    assert_eq!(m.performance_level, PerformanceLevel::Neutral);
}

#[test]
fn write_failure_keeps_vote_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("feedback_data.json");
    let store = FeedbackStore::open(&path, &FeedbackConfig::default());

    let err = store.record("q", "SELECT 1", Vote::Down).unwrap_err();
    assert!(matches!(err, PersistenceError::WriteFailed { .. }));
    assert_eq!(store.len(), 1);
    assert_eq!(store.metrics_for("q").thumbs_down, 1);
}

#[test]
fn concurrent_records_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_data.json");
    let store = Arc::new(FeedbackStore::open(&path, &FeedbackConfig::default()));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    let vote = if (t + i) % 2 == 0 { Vote::Up } else { Vote::Down };
                    store.record("shared question", "SELECT 1", vote).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let m = store.metrics_for("shared question");
    assert_eq!(m.total_feedback, 80);
    assert_eq!(m.thumbs_up + m.thumbs_down, 80);
    assert_eq!(store.len(), 80);

    // The last snapshot written is the full log.
    assert_eq!(persistence::load_log(&path).len(), 80);
}
