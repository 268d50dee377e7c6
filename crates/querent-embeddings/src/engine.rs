//! EmbeddingEngine, the entry point for question embeddings.
//!
//! Checks the L1 cache, then walks the provider chain, validates the vector
//! length, and writes through. Only vectors from the primary provider are
//! memoized; a fallback vector is recomputed on the next call. Implements `IEmbeddingProvider` so the
//! semantic cache can take it as a plain provider.

use querent_core::config::EmbeddingConfig;
use querent_core::errors::EmbeddingError;
use querent_core::models::DegradationEvent;
use querent_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::degradation::DegradationChain;
use crate::providers::{self, TfIdfProvider};

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Build the configured provider followed by a TF-IDF last resort.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        let primary = providers::create_provider(config);
        let primary_is_tfidf = primary.name() == "tfidf";
        chain.push(primary);
        if !primary_is_tfidf {
            chain.push(Box::new(TfIdfProvider::new(config.dimensions)));
        }
        let engine = Self::with_chain(chain, config.dimensions, config.l1_cache_size);
        info!(
            provider = engine.active_provider(),
            dims = engine.dimensions,
            "EmbeddingEngine initialized"
        );
        engine
    }

    /// Build around an explicit chain.
    pub fn with_chain(chain: DegradationChain, dimensions: usize, l1_cache_size: u64) -> Self {
        Self {
            chain,
            cache: L1MemoryCache::new(l1_cache_size),
            dimensions,
        }
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    /// Drop every memoized embedding.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = L1MemoryCache::key_for(text);
        if let Some(vec) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(vec);
        }

        let (embedding, provider) = self.chain.embed(text)?;
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        debug!(provider, "question embedded");
        if provider == self.chain.primary_name() {
            self.cache.insert(key, embedding.clone());
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "querent-embedding-engine"
    }

    fn is_available(&self) -> bool {
        !self.chain.is_empty()
    }
}
