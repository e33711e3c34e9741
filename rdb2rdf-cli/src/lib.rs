//! rdb2rdf CLI library.
//!
//! Types and command handlers behind the `rdb2rdf` binary. The binary
//! parses arguments, installs logging and calls [`run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let settings = config::CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Direct {
            source,
            base_uri,
            format,
            output,
        } => commands::direct::run(
            &source,
            base_uri.or(settings.base_uri),
            format.or(settings.format).unwrap_or_default(),
            output.as_deref(),
            cli.quiet,
        ),

        Commands::R2rml {
            mapping,
            source,
            format,
            output,
        } => commands::r2rml::run(
            &mapping,
            &source,
            format.or(settings.format).unwrap_or_default(),
            output.as_deref(),
            cli.quiet,
        ),
    }
}
