use crate::cli::SourceArgs;
use crate::error::CliResult;
use crate::{input, output};
use colored::Colorize;
use rdb2rdf_direct::{map_database, DirectMappingConfig};
use rdb2rdf_graph_ir::OutputFormat;
use std::path::Path;

pub fn run(
    source: &SourceArgs,
    base_uri: Option<String>,
    format: OutputFormat,
    output_path: Option<&Path>,
    quiet: bool,
) -> CliResult<()> {
    let source = input::open_source(source)?;
    let db = source.extract()?;
    let config = base_uri
        .map(DirectMappingConfig::new)
        .unwrap_or_default();

    let mut writer = output::open_writer(output_path, format)?;
    let report = map_database(&db, &config, &mut writer)?;
    writer.into_inner()?;

    output::print_summary(
        quiet,
        &format!(
            "{} {} statements ({} broken references)",
            "Wrote".green().bold(),
            report.statements,
            report.broken_references
        ),
    );
    Ok(())
}
