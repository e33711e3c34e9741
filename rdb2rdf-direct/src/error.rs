//! Direct Mapping error types

use rdb2rdf_relational::RelationalError;
use thiserror::Error;

/// Errors that abort a Direct Mapping run
#[derive(Debug, Error)]
pub enum DirectMappingError {
    /// Model inconsistency reported by the relational layer
    #[error(transparent)]
    Relational(#[from] RelationalError),

    /// A non-blob column type with no literal datatype
    #[error("No literal datatype for SQL type {sql_type} of column {table}.{column}")]
    UnmappedSqlType {
        table: String,
        column: String,
        sql_type: String,
    },

    /// The statement sink failed
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type for Direct Mapping operations
pub type DirectResult<T> = Result<T, DirectMappingError>;
