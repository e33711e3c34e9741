//! RDF statement intermediate representation
//!
//! Both mapping engines produce [`Statement`]s (a triple plus an optional
//! named graph) and hand them to a [`StatementSink`]. The sink decides what
//! happens next: collect into a [`Dataset`], or stream to a writer.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - IRIs are stored fully expanded.
//!
//! 2. **Explicit datatypes** - Literals always carry a datatype. Plain
//!    strings use `xsd:string`, language-tagged strings use `rdf:langString`.
//!    Writers print `xsd:string` literals in their plain form.
//!
//! 3. **Bag semantics by default** - [`Dataset`] keeps duplicates until
//!    `dedupe()` is called.
//!
//! # Example
//!
//! ```
//! use rdb2rdf_graph_ir::{Dataset, Statement, Term};
//!
//! let mut dataset = Dataset::new();
//! dataset.add(Statement::new(
//!     Term::iri("http://ex/customers/id=7"),
//!     Term::iri("http://ex/customers#name"),
//!     Term::string("Ann"),
//! ));
//! assert_eq!(dataset.len(), 1);
//! ```

pub mod datatype;
mod dataset;
mod sink;
mod statement;
mod term;
mod writer;

pub use datatype::Datatype;
pub use dataset::Dataset;
pub use sink::{DatasetCollectorSink, StatementSink};
pub use statement::Statement;
pub use term::{BlankId, Term};
pub use writer::{OutputFormat, StatementWriter};
