use serde::{Deserialize, Serialize};

use super::defaults;

/// Relational database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
    /// Number of pooled connections.
    pub pool_size: usize,
    /// Busy timeout applied to every connection (milliseconds).
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_DB_PATH.to_string(),
            pool_size: defaults::DEFAULT_DB_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
