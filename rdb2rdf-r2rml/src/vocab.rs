//! R2RML vocabulary constants
//!
//! IRIs from the W3C R2RML Recommendation (https://www.w3.org/TR/r2rml/)
//! that carry meaning inside a mapping's values.
//!
//! ```
//! use rdb2rdf_r2rml::R2RML;
//!
//! assert!(R2RML::DEFAULT_GRAPH.starts_with(R2RML::NS));
//! ```

/// R2RML vocabulary namespace and constants
pub struct R2RML;

impl R2RML {
    /// R2RML namespace IRI
    pub const NS: &'static str = rdb2rdf_vocab::namespaces::RR;

    // ==========================================================================
    // Term types
    // ==========================================================================

    /// rr:IRI - Term type for IRIs
    pub const IRI: &'static str = "http://www.w3.org/ns/r2rml#IRI";

    /// rr:BlankNode - Term type for blank nodes
    pub const BLANK_NODE: &'static str = "http://www.w3.org/ns/r2rml#BlankNode";

    /// rr:Literal - Term type for literals
    pub const LITERAL: &'static str = "http://www.w3.org/ns/r2rml#Literal";

    // ==========================================================================
    // Special values
    // ==========================================================================

    /// rr:defaultGraph - Graph map value meaning "the default graph"
    pub const DEFAULT_GRAPH: &'static str = "http://www.w3.org/ns/r2rml#defaultGraph";

    /// Check whether a graph IRI denotes the default graph
    pub fn is_default_graph(iri: &str) -> bool {
        iri == Self::DEFAULT_GRAPH || iri == "rr:defaultGraph"
    }
}
