//! R2RML mapping support
//!
//! This crate implements the execution side of the W3C R2RML mapping
//! language over a relational source:
//!
//! - **Validated model**: [`TriplesMap`], term maps and join conditions can
//!   only be built through constructors that enforce every structural rule,
//!   so a mapping that exists is well-formed.
//! - **JSON loading**: [`R2rmlLoader`] reads a JSON mapping document and
//!   compiles it into a [`CompiledR2rmlMapping`].
//! - **Execution**: [`R2rmlEngine`] runs each TriplesMap's logical table,
//!   materializes subjects, predicates, objects and graph sets, resolves
//!   reference joins, and emits statements into a
//!   [`StatementSink`](rdb2rdf_graph_ir::StatementSink).
//!
//! # Supported R2RML Features
//!
//! - `rr:logicalTable` with `rr:tableName` or `rr:sqlQuery`
//! - `rr:subjectMap` with `rr:constant`, `rr:column` or `rr:template`,
//!   `rr:termType`, any number of `rr:class` values and graph maps
//! - `rr:predicateObjectMap` with graph maps of its own
//! - `rr:datatype` and `rr:language` for typed/language-tagged literals,
//!   and datatypes derived from SQL column types otherwise
//! - `rr:parentTriplesMap` with `{child.col} = {parent.col}` join conditions

pub mod engine;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod materialize;
pub mod vocab;

pub use engine::{execute_mapping, R2rmlEngine, R2rmlReport};
pub use error::{R2rmlError, R2rmlResult};
pub use loader::R2rmlLoader;
pub use mapping::{
    CompiledR2rmlMapping, GraphMaps, JoinCondition, LogicalTable, ObjectMap, PredicateMap,
    PredicateObjectMap, RefObjectMap, RefPredicateMap, RefPredicateObjectMap, SubjectMap,
    Template, TermSource, TermType, TriplesMap,
};
pub use materialize::{expand_template, ColumnValues};
pub use vocab::R2RML;
