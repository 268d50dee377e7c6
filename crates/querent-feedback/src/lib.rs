//! # querent-feedback
//!
//! Durable append-only log of thumbs-up/down votes on generated SQL, plus the
//! derived per-question aggregate that drives prompt context.
//!
//! - `scoring`: vote counts → performance level, warning, success rate
//! - `similarity`: word-set Jaccard for example retrieval
//! - `persistence`: JSON log load and atomic replace-on-write
//! - `store`: the thread-safe `FeedbackStore`

pub mod persistence;
pub mod scoring;
pub mod similarity;
pub mod store;

pub use store::FeedbackStore;
