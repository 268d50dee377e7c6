use crate::errors::{ExecutionError, StorageError};
use crate::models::Row;

/// Reads table/column metadata from the backing database.
pub trait ISchemaProvider: Send + Sync {
    /// Textual description of every table and its columns.
    fn get_schema(&self) -> Result<String, StorageError>;
}

/// Runs SQL text against the backing database.
pub trait ISqlExecutor: Send + Sync {
    /// Execute `sql` and return its rows in result order.
    fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecutionError>;
}
