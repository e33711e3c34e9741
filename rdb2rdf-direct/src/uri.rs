//! IRI building helpers

use oxiri::Iri;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a table name, column name or value for use inside a
/// generated IRI. The delimiters `/`, `#`, `=` and `,` never appear unescaped.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Check an absolute IRI against the RFC 3987 grammar.
pub fn is_valid_uri(uri: &str) -> bool {
    Iri::parse(uri).is_ok()
}
