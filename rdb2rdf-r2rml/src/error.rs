//! R2RML error types

use rdb2rdf_relational::RelationalError;
use thiserror::Error;

/// R2RML-specific errors
///
/// Everything up to `UnknownTriplesMap` is raised while a mapping is being
/// constructed, before any database access.
#[derive(Debug, Error)]
pub enum R2rmlError {
    /// Error parsing a mapping document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing required property in mapping
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    /// A term map sets zero or several of constant / column / template
    #[error("{property} must set exactly one of constant, column or template (found {found})")]
    AmbiguousValueSource { property: String, found: usize },

    /// Invalid property value
    #[error("Invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },

    /// Invalid template syntax
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Join condition does not follow the `{child.col} = {parent.col}` grammar
    #[error("Invalid join condition: {0}")]
    InvalidJoinCondition(String),

    /// Reference to non-existent TriplesMap
    #[error("Unknown TriplesMap: {0}")]
    UnknownTriplesMap(String),

    /// More than one parent row satisfies a join
    #[error("Join from {triples_map} to {parent} matched {matches} parent rows, expected at most one")]
    DuplicateJoinMatch {
        triples_map: String,
        parent: String,
        matches: usize,
    },

    /// Query or model error from the relational layer
    #[error(transparent)]
    Relational(#[from] RelationalError),

    /// The statement sink failed
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type for R2RML operations
pub type R2rmlResult<T> = Result<T, R2rmlError>;
