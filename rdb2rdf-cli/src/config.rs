//! Optional TOML settings file
//!
//! ```toml
//! base_uri = "http://example.com/db/"
//! format = "nquads"
//! ```
//!
//! Command-line flags override values read here.

use crate::error::{CliError, CliResult};
use rdb2rdf_graph_ir::OutputFormat;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Base URI for the Direct Mapping
    pub base_uri: Option<String>,
    /// Output format
    pub format: Option<OutputFormat>,
}

impl CliConfig {
    /// Read `path`, or return defaults when no file was given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
            .map_err(|e| CliError::Config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
