//! Error types for the relational model.

use thiserror::Error;

/// Errors from building or querying a relational snapshot.
#[derive(Debug, Error)]
pub enum RelationalError {
    /// Structural problem in the schema (duplicate names, bad keys, row width)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Reference to a table that is not part of the snapshot
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Reference to a column that is not in a table's header
    #[error("Column not found: {column} in table {table}")]
    UnknownColumn { column: String, table: String },

    /// A foreign key was used to dereference a row of a table that does not declare it
    #[error("Foreign key ({columns}) of table {fk_table} is not declared on table {row_table}")]
    ForeignKeyNotOwned {
        fk_table: String,
        columns: String,
        row_table: String,
    },

    /// Query text that the source cannot answer
    #[error("Query error: {0}")]
    Query(String),

    /// Malformed snapshot document
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for relational operations.
pub type Result<T> = std::result::Result<T, RelationalError>;
