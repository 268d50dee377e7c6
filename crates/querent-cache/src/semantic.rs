//! The semantic cache.
//!
//! Entries are `{question, sql_query}` payloads keyed by a content id derived
//! from the question, so storing the same question again overwrites. Nothing
//! expires and nothing is removed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use querent_core::config::CacheConfig;
use querent_core::errors::{CacheError, StorageError};
use querent_core::models::{CacheHit, VectorPoint};
use querent_core::traits::{IEmbeddingProvider, IVectorStore};

/// Question → SQL cache over a vector collection.
pub struct SemanticCache {
    store: Arc<dyn IVectorStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    collection: String,
    threshold: f64,
    /// Set once provisioning has succeeded. Only skips later checks.
    provisioned: AtomicBool,
}

impl SemanticCache {
    pub fn new(
        store: Arc<dyn IVectorStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            collection: config.collection_name.clone(),
            threshold: config.similarity_threshold,
            provisioned: AtomicBool::new(false),
        }
    }

    /// Stable id for a question: the blake3 digest folded into a UUID.
    pub fn content_id(question: &str) -> String {
        let digest = blake3::hash(question.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest.as_bytes()[..16]);
        uuid::Uuid::from_bytes(bytes).to_string()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Default hit threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Create the backing collection if it is missing.
    ///
    /// Safe to call from many threads at once: losing the create race shows up
    /// as `CollectionAlreadyExists`, which counts as success.
    pub fn ensure_provisioned(&self) -> Result<(), CacheError> {
        if self.provisioned.load(Ordering::Acquire) {
            return Ok(());
        }

        let exists = self
            .store
            .collection_exists(&self.collection)
            .map_err(|e| self.provisioning_failed(e))?;
        if !exists {
            match self
                .store
                .create_collection(&self.collection, self.embedder.dimensions())
            {
                Ok(()) => info!(
                    collection = %self.collection,
                    backend = self.store.name(),
                    "cache collection provisioned"
                ),
                Err(StorageError::CollectionAlreadyExists { .. }) => {
                    debug!(collection = %self.collection, "cache collection created concurrently");
                }
                Err(e) => return Err(self.provisioning_failed(e)),
            }
        }

        self.provisioned.store(true, Ordering::Release);
        Ok(())
    }

    fn provisioning_failed(&self, e: StorageError) -> CacheError {
        CacheError::ProvisioningFailed {
            collection: self.collection.clone(),
            reason: e.to_string(),
        }
    }

    fn embed(&self, question: &str) -> Result<Vec<f32>, CacheError> {
        self.embedder
            .embed(question)
            .map_err(|e| CacheError::Unavailable {
                reason: e.to_string(),
            })
    }

    /// Look up `question` with the configured threshold.
    pub fn lookup(&self, question: &str) -> Result<Option<CacheHit>, CacheError> {
        self.lookup_with_threshold(question, self.threshold)
    }

    /// Nearest cached question; a hit only when its score is at least
    /// `threshold`.
    pub fn lookup_with_threshold(
        &self,
        question: &str,
        threshold: f64,
    ) -> Result<Option<CacheHit>, CacheError> {
        self.ensure_provisioned()?;
        let vector = self.embed(question)?;
        let matches = self
            .store
            .search(&self.collection, &vector, 1)
            .map_err(|e| CacheError::Unavailable {
                reason: e.to_string(),
            })?;

        let Some(best) = matches.into_iter().next() else {
            debug!("cache empty");
            return Ok(None);
        };
        if best.score < threshold {
            debug!(score = best.score, threshold, "nearest entry below threshold");
            return Ok(None);
        }

        let field = |name: &str| {
            best.payload
                .get(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| CacheError::MalformedEntry {
                    id: best.id.clone(),
                    reason: format!("payload has no string '{name}'"),
                })
        };
        let hit = CacheHit {
            sql_query: field("sql_query")?,
            original_question: field("question")?,
            score: best.score,
        };
        debug!(score = hit.score, original = %hit.original_question, "cache hit");
        Ok(Some(hit))
    }

    /// Store `sql_query` as the answer to `question`, replacing any earlier
    /// entry for the same question.
    pub fn store(&self, question: &str, sql_query: &str) -> Result<(), CacheError> {
        self.ensure_provisioned()?;
        let vector = self.embed(question)?;
        let point = VectorPoint {
            id: Self::content_id(question),
            vector,
            payload: json!({ "question": question, "sql_query": sql_query }),
        };
        self.store
            .upsert(&self.collection, vec![point])
            .map_err(|e| CacheError::Unavailable {
                reason: e.to_string(),
            })?;
        debug!(collection = %self.collection, "query cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_is_stable_uuid() {
        let a = SemanticCache::content_id("top 5 products");
        assert_eq!(a, SemanticCache::content_id("top 5 products"));
        assert_ne!(a, SemanticCache::content_id("Top 5 products"));
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
