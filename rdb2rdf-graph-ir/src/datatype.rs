//! RDF datatype representation
//!
//! Datatypes are always explicit: there is no "untyped" literal.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Common datatype IRIs (re-exported from the vocab crate)
pub mod iri {
    pub use rdb2rdf_vocab::rdf::LANG_STRING as RDF_LANG_STRING;
    pub use rdb2rdf_vocab::xsd::STRING as XSD_STRING;
}

/// RDF literal datatype, always an expanded IRI
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    /// rdf:langString - for language-tagged strings
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    /// Get the datatype IRI
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is xsd:string
    pub fn is_xsd_string(&self) -> bool {
        &*self.0 == iri::XSD_STRING
    }

    /// Check if this is rdf:langString
    pub fn is_lang_string(&self) -> bool {
        &*self.0 == iri::RDF_LANG_STRING
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
