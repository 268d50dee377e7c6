use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A thumbs-up or thumbs-down on a generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Up => "up",
            Vote::Down => "down",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Vote::Up),
            "down" => Ok(Vote::Down),
            other => Err(ValidationError::InvalidVote {
                value: other.to_string(),
            }),
        }
    }
}

/// One human judgement on a generated query. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub question: String,
    pub sql_query: String,
    #[serde(rename = "feedback")]
    pub vote: Vote,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(question: impl Into<String>, sql_query: impl Into<String>, vote: Vote) -> Self {
        Self {
            question: question.into(),
            sql_query: sql_query.into(),
            vote,
            timestamp: Utc::now(),
        }
    }

    /// Aggregation key: the lower-cased question.
    pub fn key(&self) -> String {
        self.question.to_lowercase()
    }
}

/// Cumulative vote counts for one lower-cased question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryScore {
    pub up_count: u64,
    pub down_count: u64,
    pub total_count: u64,
}

impl QueryScore {
    /// Fold one vote into the score.
    pub fn apply(&mut self, vote: Vote) {
        self.total_count += 1;
        match vote {
            Vote::Up => self.up_count += 1,
            Vote::Down => self.down_count += 1,
        }
    }
}

/// RFC 3339 on write; RFC 3339 or a naive ISO-8601 local timestamp on read,
/// so logs written without an offset still load.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
