use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "openai" or "tfidf".
    pub provider: String,
    /// Remote embedding model name.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
