/// SQL execution errors. Fatal to the current resolution.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{message}")]
    Statement { message: String },

    #[error("database connection failed: {message}")]
    Connection { message: String },
}
