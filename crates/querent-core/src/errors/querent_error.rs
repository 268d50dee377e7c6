use super::{
    CacheError, ConfigError, EmbeddingError, ExecutionError, GenerationError, PersistenceError,
    StorageError, ValidationError,
};

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum QuerentError {
    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("cache error: {0}")]
    CacheError(#[from] CacheError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("execution error: {0}")]
    ExecutionError(#[from] ExecutionError),

    #[error("persistence error: {0}")]
    PersistenceError(#[from] PersistenceError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Convenience alias used across the workspace.
pub type QuerentResult<T> = Result<T, QuerentError>;
