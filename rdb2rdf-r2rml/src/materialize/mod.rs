//! Term materialization module
//!
//! Generates RDF terms from logical table rows according to R2RML term
//! maps.

mod term;

pub use term::{
    blank_label, expand_template, iri_escape, materialize_graphs, materialize_object,
    materialize_predicate, materialize_subject, union_graphs, ColumnValues,
};
