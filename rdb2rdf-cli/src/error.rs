use colored::Colorize;
use rdb2rdf_direct::DirectMappingError;
use rdb2rdf_r2rml::R2rmlError;
use rdb2rdf_relational::RelationalError;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Configuration file issues.
    Config(String),
    /// Bad file path, unreadable input, parse failure.
    Input(String),
    /// Argument / usage errors.
    Usage(String),
    /// Snapshot or database extraction failure.
    Relational(RelationalError),
    /// Direct Mapping failure.
    Direct(DirectMappingError),
    /// R2RML mapping or execution failure.
    R2rml(R2rmlError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Relational(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Direct(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::R2rml(e) => write!(f, "{} {e}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<RelationalError> for CliError {
    fn from(e: RelationalError) -> Self {
        CliError::Relational(e)
    }
}

impl From<DirectMappingError> for CliError {
    fn from(e: DirectMappingError) -> Self {
        CliError::Direct(e)
    }
}

impl From<R2rmlError> for CliError {
    fn from(e: R2rmlError) -> Self {
        CliError::R2rml(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    let code = match &err {
        CliError::Usage(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    };
    process::exit(code)
}
