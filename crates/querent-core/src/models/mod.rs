//! Data model shared across the workspace.

mod degradation_event;
mod feedback;
mod metrics;
mod resolution;
mod vector;

pub use degradation_event::DegradationEvent;
pub use feedback::{FeedbackEvent, QueryScore, Vote};
pub use metrics::{FailedPattern, Metrics, OverallStats, PerformanceLevel};
pub use resolution::{FeedbackReceipt, ResolutionResult, Row, StepRecord};
pub use vector::{CacheHit, ScoredPoint, VectorPoint};
