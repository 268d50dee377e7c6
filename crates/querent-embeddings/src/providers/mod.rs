//! Embedding providers and provider selection.

mod openai;
mod tfidf;

pub use openai::OpenAiEmbeddingProvider;
pub use tfidf::TfIdfProvider;

use querent_core::config::EmbeddingConfig;
use querent_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Create the primary provider named by `config.provider`.
///
/// An unusable remote provider (no key, bad client) degrades to TF-IDF with a
/// warning instead of failing startup.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "openai" => match OpenAiEmbeddingProvider::from_config(config) {
            Ok(provider) => Box::new(provider),
            Err(e) => {
                warn!(error = %e, "openai embeddings unavailable, using tfidf");
                Box::new(TfIdfProvider::new(config.dimensions))
            }
        },
        "tfidf" => Box::new(TfIdfProvider::new(config.dimensions)),
        other => {
            warn!(provider = other, "unknown embedding provider, using tfidf");
            Box::new(TfIdfProvider::new(config.dimensions))
        }
    }
}
