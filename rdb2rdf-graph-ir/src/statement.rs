//! Statement: a triple placed in the default graph or a named graph

use crate::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (subject, predicate, object) triple with an optional named graph
///
/// `graph == None` means the default graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: Option<Term>,
}

impl Statement {
    /// Create a statement in the default graph
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: None,
        }
    }

    /// Create a statement in the given graph (`None` = default graph)
    pub fn in_graph(subject: Term, predicate: Term, object: Term, graph: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Check if this statement belongs to the default graph
    pub fn is_default_graph(&self) -> bool {
        self.graph.is_none()
    }

    /// Render as an N-Triples line (graph is dropped), without the newline
    pub fn to_ntriples(&self) -> String {
        format!("{} {} {} .", self.subject, self.predicate, self.object)
    }

    /// Render as an N-Quads line, without the newline
    pub fn to_nquads(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.graph {
            Some(g) => write!(f, "{} {} {} {} .", self.subject, self.predicate, self.object, g),
            None => write!(f, "{} {} {} .", self.subject, self.predicate, self.object),
        }
    }
}
