//! Span definitions per operation: resolution, feedback, cache, generation.

/// Create a resolution span.
#[macro_export]
macro_rules! resolution_span {
    ($resolution_id:expr, $question:expr) => {
        tracing::info_span!(
            "querent.resolution",
            resolution_id = %$resolution_id,
            question = %$question
        )
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($vote:expr) => {
        tracing::info_span!("querent.feedback", vote = %$vote)
    };
}

/// Create a cache span.
#[macro_export]
macro_rules! cache_span {
    ($operation:expr) => {
        tracing::debug_span!("querent.cache", operation = %$operation)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($provider:expr) => {
        tracing::info_span!("querent.generation", provider = %$provider)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RESOLUTION: &str = "querent.resolution";
    pub const FEEDBACK: &str = "querent.feedback";
    pub const CACHE: &str = "querent.cache";
    pub const GENERATION: &str = "querent.generation";
}
