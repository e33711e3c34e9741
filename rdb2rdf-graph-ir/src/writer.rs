//! Line-oriented N-Triples / N-Quads output

use crate::{Statement, StatementSink};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;

/// Output syntax for [`StatementWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One triple per line; named graphs are dropped
    #[default]
    NTriples,
    /// One quad per line; default-graph statements have no graph term
    NQuads,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ntriples" | "nt" | "n-triples" => Ok(OutputFormat::NTriples),
            "nquads" | "nq" | "n-quads" => Ok(OutputFormat::NQuads),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// A sink that writes each statement as one line
pub struct StatementWriter<W: Write> {
    out: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Number of lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> StatementSink for StatementWriter<W> {
    fn emit(&mut self, statement: Statement) -> io::Result<()> {
        let line = match self.format {
            OutputFormat::NTriples => statement.to_ntriples(),
            OutputFormat::NQuads => statement.to_nquads(),
        };
        writeln!(self.out, "{line}")?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    fn quad() -> Statement {
        Statement::in_graph(
            Term::iri("http://ex/s"),
            Term::iri("http://ex/p"),
            Term::string("o"),
            Some(Term::iri("http://ex/g")),
        )
    }

    #[test]
    fn test_writer_formats() {
        let mut nt = StatementWriter::new(Vec::new(), OutputFormat::NTriples);
        nt.emit(quad()).unwrap();
        assert_eq!(nt.written(), 1);
        let text = String::from_utf8(nt.into_inner().unwrap()).unwrap();
        assert_eq!(text, "<http://ex/s> <http://ex/p> \"o\" .\n");

        let mut nq = StatementWriter::new(Vec::new(), OutputFormat::NQuads);
        nq.emit(quad()).unwrap();
        let text = String::from_utf8(nq.into_inner().unwrap()).unwrap();
        assert_eq!(text, "<http://ex/s> <http://ex/p> \"o\" <http://ex/g> .\n");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("NQuads".parse::<OutputFormat>(), Ok(OutputFormat::NQuads));
        assert_eq!("nt".parse::<OutputFormat>(), Ok(OutputFormat::NTriples));
        assert!("turtle".parse::<OutputFormat>().is_err());
    }
}
