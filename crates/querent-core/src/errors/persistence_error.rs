/// Feedback log persistence errors. In-memory state is kept when these occur.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to write feedback log {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("failed to serialize feedback log: {reason}")]
    SerializeFailed { reason: String },
}
