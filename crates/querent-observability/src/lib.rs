//! # querent-observability
//!
//! Structured logging for every Querent crate: subscriber initialization
//! driven by `QUERENT_LOG` or `ObservabilityConfig`, plus span macros for the
//! resolution, feedback, cache, and generation paths.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
