//! Performance classification from cumulative vote counts.

use querent_core::constants::{
    CRITICAL_DOWN_VOTES, EXCELLENT_UP_VOTES, GOOD_UP_VOTES, POOR_DOWN_VOTES,
};
use querent_core::models::{Metrics, PerformanceLevel, QueryScore};

/// Classify a score. First match wins: down votes outrank up votes.
pub fn classify(score: &QueryScore) -> PerformanceLevel {
    if score.down_count >= CRITICAL_DOWN_VOTES {
        PerformanceLevel::Critical
    } else if score.down_count >= POOR_DOWN_VOTES {
        PerformanceLevel::Poor
    } else if score.up_count >= EXCELLENT_UP_VOTES {
        PerformanceLevel::Excellent
    } else if score.up_count >= GOOD_UP_VOTES {
        PerformanceLevel::Good
    } else if score.total_count > 0 {
        PerformanceLevel::Neutral
    } else {
        PerformanceLevel::Unknown
    }
}

/// Human-readable warning attached to a level, if any.
pub fn warning_for(level: PerformanceLevel) -> Option<&'static str> {
    match level {
        PerformanceLevel::Critical => {
            Some("CRITICAL: This query type is consistently wrong. Agent needs retraining.")
        }
        PerformanceLevel::Poor => {
            Some("WARNING: This query type has multiple failures. Review needed.")
        }
        PerformanceLevel::Excellent => {
            Some("EXCELLENT: This query type is consistently performing well.")
        }
        PerformanceLevel::Good => Some("GOOD: This query type is performing well."),
        PerformanceLevel::Neutral | PerformanceLevel::Unknown => None,
    }
}

/// Up votes over all votes; 0 when there are none.
pub fn success_rate(up: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        up as f64 / total as f64
    }
}

/// Full metrics for one question's score.
pub fn metrics_from_score(score: &QueryScore) -> Metrics {
    let level = classify(score);
    Metrics {
        thumbs_up: score.up_count,
        thumbs_down: score.down_count,
        total_feedback: score.total_count,
        performance_level: level,
        warning: warning_for(level).map(str::to_string),
        success_rate: success_rate(score.up_count, score.total_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(up: u64, down: u64) -> QueryScore {
        QueryScore {
            up_count: up,
            down_count: down,
            total_count: up + down,
        }
    }

    #[test]
    fn precedence_table() {
        assert_eq!(classify(&score(0, 0)), PerformanceLevel::Unknown);
        assert_eq!(classify(&score(1, 0)), PerformanceLevel::Neutral);
        assert_eq!(classify(&score(1, 1)), PerformanceLevel::Neutral);
        assert_eq!(classify(&score(2, 1)), PerformanceLevel::Good);
        assert_eq!(classify(&score(3, 1)), PerformanceLevel::Excellent);
        assert_eq!(classify(&score(5, 2)), PerformanceLevel::Poor);
        assert_eq!(classify(&score(10, 3)), PerformanceLevel::Critical);
    }

    #[test]
    fn down_votes_outrank_up_votes() {
        let m = metrics_from_score(&score(4, 2));
        assert_eq!(m.performance_level, PerformanceLevel::Poor);
        assert!(m.warning.unwrap().starts_with("WARNING"));
    }

    #[test]
    fn neutral_and_unknown_carry_no_warning() {
        assert!(metrics_from_score(&score(1, 0)).warning.is_none());
        assert!(metrics_from_score(&score(0, 0)).warning.is_none());
    }

    #[test]
    fn success_rate_is_a_fraction() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert_eq!(success_rate(3, 4), 0.75);
        assert_eq!(metrics_from_score(&score(0, 3)).success_rate, 0.0);
    }
}
