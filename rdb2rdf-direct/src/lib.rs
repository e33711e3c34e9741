//! W3C Direct Mapping for rdb2rdf
//!
//! Translates a relational snapshot into RDF with no user configuration:
//! tables become classes, rows become subjects, columns become predicates
//! and foreign keys become links between subjects.
//!
//! # Usage
//!
//! Build a [`rdb2rdf_relational::Database`], then call [`map_database`]
//! with a [`DirectMappingConfig`] and any
//! [`rdb2rdf_graph_ir::StatementSink`]. The returned
//! [`DirectMappingReport`] carries the broken-reference counter.
//!
//! ```
//! use rdb2rdf_direct::{map_database, DirectMappingConfig};
//! use rdb2rdf_graph_ir::DatasetCollectorSink;
//! use rdb2rdf_relational::{Database, TableData};
//!
//! let db = Database::new(vec![TableData::new("customers")
//!     .column("id", "INT")
//!     .column("name", "VARCHAR(50)")
//!     .primary_key(["id"])
//!     .row([Some("7"), Some("Ann")])])
//! .unwrap();
//!
//! let mut sink = DatasetCollectorSink::new();
//! let report = map_database(&db, &DirectMappingConfig::new("http://ex/"), &mut sink).unwrap();
//! assert_eq!(report.statements, 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod uri;

pub use config::{DirectMappingConfig, DEFAULT_BASE_URI};
pub use engine::{map_database, DirectMapper, DirectMappingReport};
pub use error::{DirectMappingError, DirectResult};
