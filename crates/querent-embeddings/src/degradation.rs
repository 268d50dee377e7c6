//! Fallback chain for embedding generation.
//!
//! Providers are tried in priority order. Each fallback past the primary is
//! recorded as a `DegradationEvent` and logged.

use std::sync::Mutex;

use chrono::Utc;
use querent_core::errors::EmbeddingError;
use querent_core::models::DegradationEvent;
use querent_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Ordered providers plus the degradation events they produced.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds. Returns the vector and
    /// the name of the provider that produced it.
    pub fn embed(&self, text: &str) -> Result<(Vec<f32>, &str), EmbeddingError> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text) {
                Ok(vec) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vec, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| EmbeddingError::ProviderUnavailable {
            provider: format!("all {} providers exhausted", self.chain.len()),
        }))
    }

    fn record_fallback(&self, fallback: &str) {
        let primary = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        let event = DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{primary} unavailable"),
            fallback_used: fallback.to_string(),
            timestamp: Utc::now(),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Take all accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Name of the highest-priority provider, available or not.
    pub fn primary_name(&self) -> &str {
        self.chain.first().map(|p| p.name()).unwrap_or("none")
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::TfIdfProvider;

    struct Broken;

    impl IEmbeddingProvider for Broken {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::InferenceFailed {
                reason: "offline".to_string(),
            })
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "broken"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn falls_back_and_records_event() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Broken));
        chain.push(Box::new(TfIdfProvider::new(8)));

        let (vec, used) = chain.embed("top products").unwrap();
        assert_eq!(vec.len(), 8);
        assert_eq!(used, "tfidf");

        let events = chain.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].failure, "broken unavailable");
        assert_eq!(events[0].fallback_used, "tfidf");
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn primary_success_records_nothing() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(TfIdfProvider::new(8)));
        chain.embed("hello").unwrap();
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn exhausted_chain_returns_last_error() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Broken));
        let err = chain.embed("hello").unwrap_err();
        assert!(matches!(err, EmbeddingError::InferenceFailed { .. }));

        let empty = DegradationChain::new();
        assert!(matches!(
            empty.embed("hello").unwrap_err(),
            EmbeddingError::ProviderUnavailable { .. }
        ));
    }
}
