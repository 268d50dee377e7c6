use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Path of the JSON feedback log.
    pub log_path: String,
    /// Jaccard similarity a past question must exceed to be offered as an example.
    pub example_similarity_threshold: f64,
    /// Maximum number of similar successful examples returned.
    pub example_limit: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            log_path: defaults::DEFAULT_FEEDBACK_PATH.to_string(),
            example_similarity_threshold: defaults::DEFAULT_EXAMPLE_SIMILARITY_THRESHOLD,
            example_limit: defaults::DEFAULT_EXAMPLE_LIMIT,
        }
    }
}
