//! Property tests for scoring and retrieval.

use proptest::prelude::*;

use querent_core::config::FeedbackConfig;
use querent_core::models::{PerformanceLevel, Vote};
use querent_feedback::similarity::{jaccard, word_set};
use querent_feedback::FeedbackStore;

const WORDS: &[&str] = &[
    "top", "5", "products", "customers", "revenue", "by", "month", "show", "all", "sales",
];

fn question() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

fn vote() -> impl Strategy<Value = Vote> {
    prop_oneof![Just(Vote::Up), Just(Vote::Down)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn similar_examples_exceed_threshold(
        history in prop::collection::vec((question(), vote()), 0..30),
        probe in question(),
    ) {
        let store = FeedbackStore::in_memory(&FeedbackConfig::default());
        for (q, v) in &history {
            store.record(q, "SELECT 1", *v).unwrap();
        }
        let target = word_set(&probe);
        let similar = store.similar_successful(&probe);
        prop_assert!(similar.len() <= 3);
        let mut previous = f64::INFINITY;
        for event in &similar {
            prop_assert_eq!(event.vote, Vote::Up);
            let sim = jaccard(&target, &word_set(&event.question));
            prop_assert!(sim > 0.30);
            prop_assert!(sim <= previous);
            previous = sim;
        }
    }

    #[test]
    fn failed_patterns_are_sorted_and_qualified(
        history in prop::collection::vec((question(), vote()), 0..40),
    ) {
        let store = FeedbackStore::in_memory(&FeedbackConfig::default());
        for (q, v) in &history {
            store.record(q, "SELECT 1", *v).unwrap();
        }
        let patterns = store.failed_patterns();
        for p in &patterns {
            prop_assert!(p.thumbs_down >= 2);
            prop_assert_eq!(p.thumbs_up + p.thumbs_down, p.total);
        }
        for pair in patterns.windows(2) {
            prop_assert!(pair[0].thumbs_down >= pair[1].thumbs_down);
        }
    }

    #[test]
    fn scores_equal_fold_of_events(
        history in prop::collection::vec((question(), vote()), 0..40),
        probe in question(),
    ) {
        let store = FeedbackStore::in_memory(&FeedbackConfig::default());
        for (q, v) in &history {
            store.record(q, "SELECT 1", *v).unwrap();
        }
        let key = probe.to_lowercase();
        let up = history.iter().filter(|(q, v)| q.to_lowercase() == key && *v == Vote::Up).count() as u64;
        let down = history.iter().filter(|(q, v)| q.to_lowercase() == key && *v == Vote::Down).count() as u64;
        let m = store.metrics_for(&probe);
        prop_assert_eq!(m.thumbs_up, up);
        prop_assert_eq!(m.thumbs_down, down);
        if down >= 3 {
            prop_assert_eq!(m.performance_level, PerformanceLevel::Critical);
        }
        if up + down == 0 {
            prop_assert_eq!(m.performance_level, PerformanceLevel::Unknown);
        }
    }
}
