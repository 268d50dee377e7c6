//! # querent-embeddings
//!
//! Turns questions into fixed-length vectors for the semantic cache.
//! `EmbeddingEngine` fronts an ordered provider chain (OpenAI-compatible API,
//! then hashed TF-IDF) with an in-memory cache keyed by content hash.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::{OpenAiEmbeddingProvider, TfIdfProvider};
