//! Direct Mapping configuration

use serde::Deserialize;

/// Base URI used when none is configured
pub const DEFAULT_BASE_URI: &str = "http://foo.example/DB/";

/// Immutable settings passed into each Direct Mapping run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectMappingConfig {
    /// Prefix of every generated IRI
    pub base_uri: String,
}

impl DirectMappingConfig {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }
}

impl Default for DirectMappingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URI)
    }
}
