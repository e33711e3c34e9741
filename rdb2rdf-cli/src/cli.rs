use clap::{Args, Parser, Subcommand};
use rdb2rdf_graph_ir::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rdb2rdf", about = "Relational database to RDF converter", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a database with the W3C Direct Mapping
    Direct {
        #[command(flatten)]
        source: SourceArgs,

        /// Base URI for generated IRIs
        #[arg(long)]
        base_uri: Option<String>,

        /// Output format (ntriples or nquads)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write statements to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Execute an R2RML mapping against a database
    R2rml {
        /// R2RML mapping document (JSON)
        #[arg(long, short = 'm')]
        mapping: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format (ntriples or nquads)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write statements to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// Where the relational data comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Relational snapshot (JSON)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub sqlite: Option<PathBuf>,
}
