use crate::error::{CliError, CliResult};
use rdb2rdf_graph_ir::{OutputFormat, StatementWriter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Statement writer over stdout or a file.
pub fn open_writer(
    output: Option<&Path>,
    format: OutputFormat,
) -> CliResult<StatementWriter<Box<dyn Write>>> {
    let out: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::Input(format!("cannot create {}: {e}", path.display()))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(StatementWriter::new(out, format))
}

/// Print the one-line run summary to stderr.
pub fn print_summary(quiet: bool, line: &str) {
    if !quiet {
        eprintln!("{line}");
    }
}
