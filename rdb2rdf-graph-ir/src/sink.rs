//! StatementSink trait for streaming engine output
//!
//! Mapping engines call [`StatementSink::emit`] once per generated
//! statement without knowing the concrete sink type. The sink can be:
//! - [`DatasetCollectorSink`]: collects statements into a [`Dataset`]
//! - [`crate::StatementWriter`]: writes N-Triples / N-Quads lines

use crate::{Dataset, Statement, Term};
use std::io;

/// Receiver of generated statements
///
/// `emit` returns `io::Result` so that writing sinks can surface output
/// failures; in-memory sinks never fail.
pub trait StatementSink {
    /// Accept one statement
    fn emit(&mut self, statement: Statement) -> io::Result<()>;

    /// Convenience wrapper around [`StatementSink::emit`]
    ///
    /// `graph == None` places the statement in the default graph.
    fn emit_parts(
        &mut self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Option<Term>,
    ) -> io::Result<()> {
        self.emit(Statement::in_graph(subject, predicate, object, graph))
    }
}

impl<S: StatementSink + ?Sized> StatementSink for &mut S {
    fn emit(&mut self, statement: Statement) -> io::Result<()> {
        (**self).emit(statement)
    }
}

/// A sink that collects statements into a [`Dataset`]
#[derive(Debug, Default)]
pub struct DatasetCollectorSink {
    dataset: Dataset,
}

impl DatasetCollectorSink {
    /// Create a new collector sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish collecting and return the dataset
    pub fn finish(self) -> Dataset {
        self.dataset
    }

    /// Get the current dataset (non-consuming)
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl StatementSink for DatasetCollectorSink {
    fn emit(&mut self, statement: Statement) -> io::Result<()> {
        self.dataset.add(statement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_one(sink: &mut impl StatementSink) -> io::Result<()> {
        sink.emit_parts(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Term::blank("b0"),
            Some(Term::iri("http://ex/g")),
        )
    }

    #[test]
    fn test_collector_sink() {
        let mut sink = DatasetCollectorSink::new();
        emit_one(&mut sink).unwrap();
        emit_one(&mut &mut sink).unwrap();
        assert_eq!(sink.dataset().len(), 2);

        let ds = sink.finish();
        let first = &ds.statements()[0];
        assert_eq!(first.graph, Some(Term::iri("http://ex/g")));
        assert!(first.object.is_blank());
    }
}
