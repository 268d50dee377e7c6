//! # querent-cache
//!
//! Maps questions to previously generated SQL by embedding similarity.
//! `SemanticCache` sits on any `IVectorStore`; `QdrantVectorStore` speaks the
//! Qdrant REST API for deployments that already run one.

pub mod qdrant;
pub mod semantic;

pub use qdrant::QdrantVectorStore;
pub use semantic::SemanticCache;
