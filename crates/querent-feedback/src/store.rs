//! The feedback store.
//!
//! One mutex guards the event log and the per-question aggregate together, so
//! an append and its score increment are seen as one update. Disk writes take
//! a snapshot under that lock and are serialized by a second writer lock; a
//! snapshot older than one already written is skipped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use querent_core::config::FeedbackConfig;
use querent_core::constants::{CRITICAL_DOWN_VOTES, EXCELLENT_UP_VOTES, POOR_DOWN_VOTES};
use querent_core::errors::PersistenceError;
use querent_core::models::{
    FailedPattern, FeedbackEvent, Metrics, OverallStats, QueryScore, Vote,
};
use tracing::{debug, info, warn};

use crate::persistence;
use crate::scoring;
use crate::similarity::{jaccard, word_set};

/// Per-question scores in first-appearance order.
#[derive(Debug, Default)]
struct ScoreTable {
    order: Vec<String>,
    scores: HashMap<String, QueryScore>,
}

impl ScoreTable {
    fn from_events(events: &[FeedbackEvent]) -> Self {
        let mut table = Self::default();
        for event in events {
            table.apply(event.key(), event.vote);
        }
        table
    }

    fn apply(&mut self, key: String, vote: Vote) {
        if !self.scores.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.scores.entry(key).or_default().apply(vote);
    }

    fn get(&self, key: &str) -> QueryScore {
        self.scores.get(key).copied().unwrap_or_default()
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &QueryScore)> {
        self.order
            .iter()
            .filter_map(move |k| self.scores.get(k).map(|s| (k, s)))
    }
}

struct State {
    events: Vec<FeedbackEvent>,
    table: ScoreTable,
    /// Bumped on every append; tags snapshots for the writer.
    sequence: u64,
}

/// Thread-safe feedback log with derived scores.
pub struct FeedbackStore {
    path: Option<PathBuf>,
    config: FeedbackConfig,
    state: Mutex<State>,
    /// Sequence number of the last snapshot written to disk.
    written: Mutex<u64>,
}

impl FeedbackStore {
    /// Open the log at `path`, rebuilding scores from its events.
    pub fn open(path: impl AsRef<Path>, config: &FeedbackConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        let events = persistence::load_log(&path);
        info!(path = %path.display(), events = events.len(), "feedback log loaded");
        Self::build(Some(path), events, config)
    }

    /// A store with no backing file.
    pub fn in_memory(config: &FeedbackConfig) -> Self {
        Self::build(None, Vec::new(), config)
    }

    fn build(path: Option<PathBuf>, events: Vec<FeedbackEvent>, config: &FeedbackConfig) -> Self {
        let table = ScoreTable::from_events(&events);
        Self {
            path,
            config: config.clone(),
            state: Mutex::new(State {
                events,
                table,
                sequence: 0,
            }),
            written: Mutex::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a vote and persist the log.
    ///
    /// The vote is reflected in memory even when the write fails; the error
    /// only reports that the disk copy is stale.
    pub fn record(
        &self,
        question: &str,
        sql_query: &str,
        vote: Vote,
    ) -> Result<Metrics, PersistenceError> {
        let event = FeedbackEvent::new(question, sql_query, vote);
        let key = event.key();

        let (metrics, snapshot) = {
            let mut state = self.state();
            state.events.push(event);
            state.table.apply(key.clone(), vote);
            state.sequence += 1;
            let metrics = scoring::metrics_from_score(&state.table.get(&key));
            let snapshot = self
                .path
                .as_ref()
                .map(|_| (state.sequence, state.events.clone()));
            (metrics, snapshot)
        };
        debug!(question = %key, vote = %vote, level = %metrics.performance_level, "feedback recorded");

        if let (Some(path), Some((sequence, events))) = (&self.path, snapshot) {
            self.persist(path, sequence, &events)?;
        }
        Ok(metrics)
    }

    fn persist(
        &self,
        path: &Path,
        sequence: u64,
        events: &[FeedbackEvent],
    ) -> Result<(), PersistenceError> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if sequence <= *written {
            debug!(sequence, written = *written, "newer feedback snapshot already on disk");
            return Ok(());
        }
        match persistence::write_log(path, events) {
            Ok(()) => {
                *written = sequence;
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "feedback log write failed, keeping in memory");
                Err(e)
            }
        }
    }

    /// Metrics for `question` (case-insensitive).
    pub fn metrics_for(&self, question: &str) -> Metrics {
        let score = self.state().table.get(&question.to_lowercase());
        scoring::metrics_from_score(&score)
    }

    /// Up-voted events whose question is similar to `question`, best first,
    /// with the configured threshold and limit.
    pub fn similar_successful(&self, question: &str) -> Vec<FeedbackEvent> {
        self.similar_successful_with(
            question,
            self.config.example_similarity_threshold,
            self.config.example_limit,
        )
    }

    /// Up-voted events with Jaccard similarity strictly above `threshold`,
    /// sorted descending (ties keep log order), at most `limit`.
    pub fn similar_successful_with(
        &self,
        question: &str,
        threshold: f64,
        limit: usize,
    ) -> Vec<FeedbackEvent> {
        let target = word_set(question);
        let mut scored: Vec<(f64, FeedbackEvent)> = self
            .state()
            .events
            .iter()
            .filter(|e| e.vote == Vote::Up)
            .filter_map(|e| {
                let sim = jaccard(&target, &word_set(&e.question));
                (sim > threshold).then(|| (sim, e.clone()))
            })
            .collect();

        // Vec::sort_by is stable.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }

    /// Questions with at least two down votes, most down votes first.
    pub fn failed_patterns(&self) -> Vec<FailedPattern> {
        let mut failed: Vec<FailedPattern> = self
            .state()
            .table
            .iter()
            .filter(|(_, s)| s.down_count >= POOR_DOWN_VOTES)
            .map(|(q, s)| FailedPattern {
                question_pattern: q.clone(),
                thumbs_down: s.down_count,
                thumbs_up: s.up_count,
                total: s.total_count,
            })
            .collect();
        failed.sort_by(|a, b| b.thumbs_down.cmp(&a.thumbs_down));
        failed
    }

    /// Aggregate over every distinct question.
    pub fn overall_stats(&self) -> OverallStats {
        let state = self.state();
        let mut stats = OverallStats {
            total_feedback: 0,
            thumbs_up: 0,
            thumbs_down: 0,
            success_rate: 0.0,
            unique_queries: 0,
            critical_queries: 0,
            excellent_queries: 0,
        };
        for (_, score) in state.table.iter() {
            stats.thumbs_up += score.up_count;
            stats.thumbs_down += score.down_count;
            stats.unique_queries += 1;
            if score.down_count >= CRITICAL_DOWN_VOTES {
                stats.critical_queries += 1;
            }
            if score.up_count >= EXCELLENT_UP_VOTES {
                stats.excellent_queries += 1;
            }
        }
        stats.total_feedback = stats.thumbs_up + stats.thumbs_down;
        stats.success_rate = scoring::success_rate(stats.thumbs_up, stats.total_feedback);
        stats
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.state().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the log in append order.
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.state().events.clone()
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
