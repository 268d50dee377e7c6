//! Prompt construction.
//!
//! Layout: the question, the schema, a performance-context block chosen by
//! the question's feedback level, up to three up-voted examples, then the
//! output instruction.

use std::fmt::Write;

use querent_core::constants::MAX_PROMPT_EXAMPLES;
use querent_core::models::{FeedbackEvent, Metrics, PerformanceLevel};

/// Caution or reinforcement text for `metrics`; empty for neutral/unknown.
pub fn performance_context(metrics: &Metrics) -> String {
    match metrics.performance_level {
        PerformanceLevel::Critical => format!(
            "\nCRITICAL WARNING: Similar queries have failed {} times.\n\
             Previous attempts were incorrect. Be extra careful with this query type.\n",
            metrics.thumbs_down
        ),
        PerformanceLevel::Poor => format!(
            "\nWARNING: Similar queries have {} failures.\n\
             Review the query carefully before generating.\n",
            metrics.thumbs_down
        ),
        PerformanceLevel::Excellent | PerformanceLevel::Good => format!(
            "\nThis query type has {} successes. Continue with similar approach.\n",
            metrics.thumbs_up
        ),
        PerformanceLevel::Neutral | PerformanceLevel::Unknown => String::new(),
    }
}

/// Numbered question/SQL pairs; empty when there are none.
pub fn examples_context(examples: &[FeedbackEvent]) -> String {
    if examples.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n\nSuccessful similar queries for reference:");
    for (i, ex) in examples.iter().take(MAX_PROMPT_EXAMPLES).enumerate() {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\nExample {}:\n  Question: {}\n  SQL: {}",
            i + 1,
            ex.question,
            ex.sql_query
        );
    }
    out
}

/// Full generation prompt.
pub fn build_prompt(
    question: &str,
    schema: &str,
    metrics: &Metrics,
    examples: &[FeedbackEvent],
) -> String {
    format!(
        "Generate a SQL query for: {question}\n\n\
         Database Schema:\n{schema}\n{}\n{}\n\n\
         Return ONLY the SQL query, no explanations.",
        performance_context(metrics),
        examples_context(examples),
    )
}
