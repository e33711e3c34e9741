use crate::cli::SourceArgs;
use crate::error::CliResult;
use crate::{input, output};
use colored::Colorize;
use rdb2rdf_graph_ir::OutputFormat;
use rdb2rdf_r2rml::{execute_mapping, R2rmlLoader};
use std::path::Path;

pub fn run(
    mapping_path: &Path,
    source: &SourceArgs,
    format: OutputFormat,
    output_path: Option<&Path>,
    quiet: bool,
) -> CliResult<()> {
    // Validate the mapping before touching the database.
    let mapping = R2rmlLoader::from_path(mapping_path)?.compile()?;
    tracing::debug!(triples_maps = mapping.len(), "Mapping compiled");

    let source = input::open_source(source)?;
    let mut writer = output::open_writer(output_path, format)?;
    let report = execute_mapping(&mapping, source.as_ref(), &mut writer)?;
    writer.into_inner()?;

    output::print_summary(
        quiet,
        &format!(
            "{} {} statements ({} unresolved joins)",
            "Wrote".green().bold(),
            report.statements,
            report.unresolved_joins
        ),
    );
    Ok(())
}
