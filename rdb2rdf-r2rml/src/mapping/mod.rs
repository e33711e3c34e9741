//! R2RML mapping structures
//!
//! The validated, in-memory form of a mapping document. These structures
//! are produced by the [`crate::loader`] module (or built directly) and
//! executed by [`crate::R2rmlEngine`].

mod compiled;
mod ref_object_map;
mod template;
mod term_map;
mod triples_map;

pub use compiled::CompiledR2rmlMapping;
pub use ref_object_map::{JoinCondition, RefObjectMap, RefPredicateMap, RefPredicateObjectMap};
pub use template::Template;
pub use term_map::{
    GraphMaps, ObjectMap, PredicateMap, PredicateObjectMap, SubjectMap, TermSource, TermType,
};
pub use triples_map::{LogicalTable, TriplesMap};
