//! Error taxonomy. One enum per subsystem, aggregated by [`QuerentError`].

mod cache_error;
mod config_error;
mod embedding_error;
mod execution_error;
mod generation_error;
mod persistence_error;
mod querent_error;
mod storage_error;
mod validation_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use execution_error::ExecutionError;
pub use generation_error::GenerationError;
pub use persistence_error::PersistenceError;
pub use querent_error::{QuerentError, QuerentResult};
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
