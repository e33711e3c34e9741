//! Relational model for rdb2rdf.
//!
//! This crate provides the in-memory relational snapshot that both mapping
//! engines read: tables, rows, candidate and foreign keys, plus the
//! per-foreign-key hash index that makes dereference O(1).
//!
//! # Design
//!
//! - **Row arena**: rows live in one arena and are addressed by [`RowId`],
//!   so row identity is an integer, not a pointer
//! - **Read-only after construction**: [`Database::new`] validates the
//!   schema and builds every index before anything can read it
//! - **Materialized cursors**: [`RelationalSource::run_query`] returns
//!   independent [`RowCursor`]s, so nested queries never move an outer one
//! - **SQL type table**: [`SqlType::xsd_datatype`] maps declared column
//!   types to XSD datatypes

pub mod cursor;
pub mod database;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod source;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod sql_type;

pub use cursor::{ColumnMeta, ResultSet, RowCursor};
pub use database::Database;
pub use error::{RelationalError, Result};
pub use model::{CandidateKey, ForeignKey, Header, KeyKind, Row, RowId, Table};
pub use snapshot::{ColumnDef, ForeignKeyDef, KeyRef, QueryData, Snapshot, TableData};
pub use source::{normalize_sql, MemorySource, RelationalSource};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSource;
pub use sql_type::SqlType;
