//! In-memory statement collection

use crate::{Statement, Term};

/// A collection of statements across the default graph and named graphs
///
/// Uses bag semantics: duplicates are kept until [`Dataset::dedupe`] is
/// called.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    statements: Vec<Statement>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement
    pub fn add(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Number of statements (including duplicates)
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over statements
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Check whether an equal statement is present
    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    /// Sort statements (graph order follows SPO within each statement)
    pub fn sort(&mut self) {
        self.statements.sort();
    }

    /// Remove duplicate statements
    ///
    /// Sorts first, so the dataset is left in canonical order.
    pub fn dedupe(&mut self) {
        self.statements.sort();
        self.statements.dedup();
    }

    /// Statements whose subject equals `subject`
    pub fn with_subject<'a>(&'a self, subject: &'a Term) -> impl Iterator<Item = &'a Statement> {
        self.statements.iter().filter(move |st| &st.subject == subject)
    }

    /// Distinct named graphs, sorted
    pub fn graph_names(&self) -> Vec<&Term> {
        let mut graphs: Vec<&Term> = self
            .statements
            .iter()
            .filter_map(|st| st.graph.as_ref())
            .collect();
        graphs.sort();
        graphs.dedup();
        graphs
    }

    /// Borrow the statements as a slice
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Consume and return the statements
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl IntoIterator for Dataset {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(s: &str, o: &str, g: Option<&str>) -> Statement {
        Statement::in_graph(
            Term::iri(s),
            Term::iri("http://ex/p"),
            Term::string(o),
            g.map(Term::iri),
        )
    }

    #[test]
    fn test_dedupe_and_sort() {
        let mut ds = Dataset::new();
        ds.add(st("http://ex/b", "2", None));
        ds.add(st("http://ex/a", "1", None));
        ds.add(st("http://ex/b", "2", None));
        assert_eq!(ds.len(), 3);

        ds.dedupe();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.statements()[0].subject, Term::iri("http://ex/a"));
    }

    #[test]
    fn test_graph_names() {
        let mut ds = Dataset::new();
        ds.add(st("http://ex/a", "1", Some("http://ex/g2")));
        ds.add(st("http://ex/a", "1", Some("http://ex/g1")));
        ds.add(st("http://ex/a", "1", Some("http://ex/g2")));
        ds.add(st("http://ex/a", "1", None));

        let names = ds.graph_names();
        assert_eq!(names, vec![&Term::iri("http://ex/g1"), &Term::iri("http://ex/g2")]);
        assert_eq!(ds.with_subject(&Term::iri("http://ex/a")).count(), 4);
    }
}
