use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of how past generations for a question have fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceLevel {
    Critical,
    Poor,
    Excellent,
    Good,
    Neutral,
    Unknown,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Critical => "critical",
            PerformanceLevel::Poor => "poor",
            PerformanceLevel::Excellent => "excellent",
            PerformanceLevel::Good => "good",
            PerformanceLevel::Neutral => "neutral",
            PerformanceLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance signal for one question, derived from its vote counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub total_feedback: u64,
    pub performance_level: PerformanceLevel,
    pub warning: Option<String>,
    /// Fraction of up votes, in `[0, 1]`. Zero when there is no feedback.
    pub success_rate: f64,
}

/// Aggregate over every distinct question in the feedback log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_feedback: u64,
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub success_rate: f64,
    pub unique_queries: usize,
    pub critical_queries: usize,
    pub excellent_queries: usize,
}

/// A question pattern with repeated down votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPattern {
    pub question_pattern: String,
    pub thumbs_down: u64,
    pub thumbs_up: u64,
    pub total: u64,
}
