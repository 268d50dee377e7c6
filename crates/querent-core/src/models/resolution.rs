use serde::{Deserialize, Serialize};

use super::{FeedbackEvent, Metrics};

/// One result row: column name to value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// One entry of the resolution audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub actor: String,
    pub message: String,
}

impl StepRecord {
    pub fn new(actor: &str, message: impl Into<String>) -> Self {
        Self {
            actor: actor.to_string(),
            message: message.into(),
        }
    }
}

/// Fully populated outcome of resolving one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub resolution_id: String,
    pub question: String,
    pub sql_query: String,
    pub results: Vec<Row>,
    pub cached: bool,
    pub error: Option<String>,
    pub feedback_metrics: Option<Metrics>,
    pub similar_examples: Vec<FeedbackEvent>,
    pub message_trail: Vec<StepRecord>,
    pub message_count: usize,
}

impl ResolutionResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of recording a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    pub metrics: Metrics,
    /// Set when the vote was applied in memory but could not be persisted.
    pub warning: Option<String>,
}
