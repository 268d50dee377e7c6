//! Per-request resolution state.

use querent_core::constants::actors;
use querent_core::models::{FeedbackEvent, Metrics, ResolutionResult, Row, StepRecord};

use crate::stage::Stage;

/// Everything accumulated while resolving one question. Lives for one call.
#[derive(Debug, Clone)]
pub struct ResolutionState {
    pub question: String,
    pub sql_query: String,
    pub results: Vec<Row>,
    pub cached: bool,
    pub error: Option<String>,
    pub feedback_metrics: Option<Metrics>,
    pub similar_examples: Vec<FeedbackEvent>,
    pub message_trail: Vec<StepRecord>,
    pub next_step: Stage,
}

impl ResolutionState {
    /// Fresh state at `CacheCheck`, with the question as the first trail entry.
    pub fn new(question: impl Into<String>) -> Self {
        let question = question.into();
        Self {
            message_trail: vec![StepRecord::new(actors::USER, question.clone())],
            question,
            sql_query: String::new(),
            results: Vec::new(),
            cached: false,
            error: None,
            feedback_metrics: None,
            similar_examples: Vec::new(),
            next_step: Stage::CacheCheck,
        }
    }

    pub fn record(&mut self, actor: &str, message: impl Into<String>) {
        self.message_trail.push(StepRecord::new(actor, message));
    }

    /// Set `error` and route to `Terminal`.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.next_step = Stage::Terminal;
    }

    pub fn into_result(self, resolution_id: impl Into<String>) -> ResolutionResult {
        ResolutionResult {
            resolution_id: resolution_id.into(),
            message_count: self.message_trail.len(),
            question: self.question,
            sql_query: self.sql_query,
            results: self.results,
            cached: self.cached,
            error: self.error,
            feedback_metrics: self.feedback_metrics,
            similar_examples: self.similar_examples,
            message_trail: self.message_trail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_cache_check() {
        let state = ResolutionState::new("top 5 products");
        assert_eq!(state.next_step, Stage::CacheCheck);
        assert_eq!(state.message_trail.len(), 1);
        assert_eq!(state.message_trail[0].actor, "user");
        assert_eq!(state.message_trail[0].message, "top 5 products");
    }

    #[test]
    fn fail_routes_to_terminal() {
        let mut state = ResolutionState::new("q");
        state.fail("boom");
        assert!(state.next_step.is_terminal());
        let result = state.into_result("id");
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.message_count, 1);
    }
}
