use serde::{Deserialize, Serialize};

use super::defaults;

/// Semantic cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Vector collection holding cached question/SQL pairs.
    pub collection_name: String,
    /// Minimum similarity score for a lookup to count as a hit.
    pub similarity_threshold: f64,
    /// Vector backend: "sqlite" or "qdrant".
    pub backend: String,
    /// SQLite vector store path (sqlite backend).
    pub vector_store_path: String,
    /// Qdrant base URL (qdrant backend).
    pub qdrant_url: String,
    /// Qdrant API key, if the instance requires one.
    pub qdrant_api_key: Option<String>,
    /// Qdrant request timeout (seconds).
    pub qdrant_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            collection_name: defaults::DEFAULT_COLLECTION_NAME.to_string(),
            similarity_threshold: defaults::DEFAULT_CACHE_SIMILARITY_THRESHOLD,
            backend: defaults::DEFAULT_CACHE_BACKEND.to_string(),
            vector_store_path: defaults::DEFAULT_VECTOR_STORE_PATH.to_string(),
            qdrant_url: defaults::DEFAULT_QDRANT_URL.to_string(),
            qdrant_api_key: None,
            qdrant_timeout_secs: defaults::DEFAULT_QDRANT_TIMEOUT_SECS,
        }
    }
}
