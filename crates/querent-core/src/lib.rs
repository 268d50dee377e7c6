//! # querent-core
//!
//! Foundation crate for the Querent text-to-SQL system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QuerentConfig;
pub use errors::{QuerentError, QuerentResult};
pub use models::{FeedbackEvent, Metrics, PerformanceLevel, QueryScore, Row, Vote};
