//! The relational database questions are answered against.
//!
//! A plain query-and-introspect facade: `get_schema` renders every user
//! table with its columns, `execute` runs one statement and returns its rows
//! as ordered JSON objects.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use tracing::debug;

use querent_core::config::DatabaseConfig;
use querent_core::errors::{ExecutionError, StorageError};
use querent_core::models::Row;
use querent_core::traits::{ISchemaProvider, ISqlExecutor};

use crate::pool::ConnectionPool;
use crate::to_storage_err;

/// SQLite-backed schema provider and SQL executor.
pub struct SqliteDatabase {
    pool: ConnectionPool,
}

impl SqliteDatabase {
    /// Open the database described by `config`.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StorageError> {
        Self::open_path(
            Path::new(&config.path),
            config.pool_size,
            config.busy_timeout_ms,
        )
    }

    /// Open a file-backed database.
    pub fn open_path(
        path: &Path,
        pool_size: usize,
        busy_timeout_ms: u32,
    ) -> Result<Self, StorageError> {
        let pool = ConnectionPool::open(path, pool_size, busy_timeout_ms)?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let pool = ConnectionPool::open_in_memory(2)?;
        Ok(Self { pool })
    }

    /// Run a batch of statements (DDL, seeding). Not part of the resolution path.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        self.pool.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(|e| to_storage_err(e.to_string()))
        })
    }

    /// Names of all user tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, StorageError> {
        self.pool.with_conn(table_names)
    }
}

fn table_names(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(names)
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<(String, String)>, StorageError> {
    let mut stmt = conn
        .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let columns = stmt
        .query_map([table], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(columns)
}

/// Convert one SQLite value to JSON. Blobs become lowercase hex strings.
fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => {
            Value::String(bytes.iter().map(|b| format!("{b:02x}")).collect())
        }
    }
}

fn statement_err(e: rusqlite::Error) -> ExecutionError {
    ExecutionError::Statement {
        message: e.to_string(),
    }
}

impl ISchemaProvider for SqliteDatabase {
    fn get_schema(&self) -> Result<String, StorageError> {
        self.pool.with_conn(|conn| {
            let mut sections = Vec::new();
            for table in table_names(conn)? {
                let columns = table_columns(conn, &table)?
                    .into_iter()
                    .map(|(name, ty)| format!("{name} ({ty})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                sections.push(format!("Table: {table}\nColumns: {columns}"));
            }
            Ok(sections.join("\n\n"))
        })
    }
}

impl ISqlExecutor for SqliteDatabase {
    fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecutionError> {
        let conn = self
            .pool
            .acquire()
            .map_err(|e| ExecutionError::Connection {
                message: e.to_string(),
            })?;

        let mut stmt = conn.prepare(sql).map_err(statement_err)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        if columns.is_empty() {
            let changed = stmt.execute([]).map_err(statement_err)?;
            debug!(changed, "statement returned no columns");
            return Ok(Vec::new());
        }

        let mut rows = stmt.query([]).map_err(statement_err)?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().map_err(statement_err)? {
            let mut record = Row::new();
            for (idx, name) in columns.iter().enumerate() {
                let value = row.get_ref(idx).map_err(statement_err)?;
                record.insert(name.clone(), to_json(value));
            }
            results.push(record);
        }
        debug!(rows = results.len(), "statement executed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteDatabase {
        let db = SqliteDatabase::open_in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE products (product_id INTEGER PRIMARY KEY, product_name TEXT NOT NULL, price REAL);
             INSERT INTO products VALUES (1, 'Laptop', 1299.99), (2, 'Mouse', 29.99), (3, 'Pen', NULL);",
        )
        .unwrap();
        db
    }

    #[test]
    fn schema_lists_tables_and_columns() {
        let db = seeded();
        let schema = db.get_schema().unwrap();
        assert_eq!(
            schema,
            "Table: products\nColumns: product_id (INTEGER), product_name (TEXT), price (REAL)"
        );
    }

    #[test]
    fn empty_database_has_empty_schema() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        assert_eq!(db.get_schema().unwrap(), "");
    }

    #[test]
    fn execute_returns_rows_in_column_order() {
        let db = seeded();
        let rows = db
            .execute("SELECT product_name, price FROM products ORDER BY product_id")
            .unwrap();
        assert_eq!(rows.len(), 3);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["product_name", "price"]);
        assert_eq!(rows[0]["product_name"], "Laptop");
        assert_eq!(rows[2]["price"], Value::Null);
    }

    #[test]
    fn execute_reports_syntax_errors() {
        let db = seeded();
        let err = db.execute("SELEC * FROM products").unwrap_err();
        assert!(matches!(err, ExecutionError::Statement { .. }));
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn execute_statement_without_rows() {
        let db = seeded();
        let rows = db
            .execute("UPDATE products SET price = 1.0 WHERE product_id = 3")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn blobs_render_as_hex() {
        assert_eq!(to_json(ValueRef::Blob(&[0xde, 0xad, 0x01])), Value::from("dead01"));
    }
}
