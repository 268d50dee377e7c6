/// Storage-layer errors for SQLite and vector backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("collection '{name}' already exists")]
    CollectionAlreadyExists { name: String },

    #[error("collection '{name}' not found")]
    CollectionNotFound { name: String },

    #[error("vector backend unreachable: {reason}")]
    BackendUnreachable { reason: String },

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
