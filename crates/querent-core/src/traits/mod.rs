//! Collaborator seams consumed by the resolution core.

mod database;
mod embedding;
mod generation;
mod vector_store;

pub use database::{ISchemaProvider, ISqlExecutor};
pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationProvider;
pub use vector_store::IVectorStore;
