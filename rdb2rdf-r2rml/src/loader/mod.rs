//! R2RML loader module
//!
//! Reads mapping documents written in JSON:
//!
//! ```json
//! { "triplesMaps": [ {
//!     "id": "#Emp",
//!     "logicalTable": { "tableName": "EMP" },
//!     "subjectMap": { "template": "http://ex.org/emp/{ID}", "class": ["http://ex.org/Employee"] },
//!     "predicateObjectMaps": [ { "predicate": "http://ex.org/name", "objectMap": { "column": "NAME" } } ],
//!     "refPredicateObjectMaps": [ {
//!         "predicate": "http://ex.org/dept",
//!         "objectMap": { "parentTriplesMap": "#Dept", "joinCondition": "{child.DEPT} = {parent.ID}" }
//!     } ]
//! } ] }
//! ```

mod document;
mod extractor;

pub use document::MappingDocument;
pub use extractor::MappingExtractor;

use std::path::Path;

use crate::error::{R2rmlError, R2rmlResult};
use crate::mapping::CompiledR2rmlMapping;

/// R2RML mapping loader
///
/// Parse with [`R2rmlLoader::from_json`] or [`R2rmlLoader::from_path`], then
/// call [`R2rmlLoader::compile`] to validate and build the mapping.
#[derive(Debug)]
pub struct R2rmlLoader {
    document: MappingDocument,
}

impl R2rmlLoader {
    /// Load R2RML from a JSON string
    pub fn from_json(content: &str) -> R2rmlResult<Self> {
        let document =
            serde_json::from_str(content).map_err(|e| R2rmlError::Parse(e.to_string()))?;
        Ok(Self { document })
    }

    /// Load R2RML from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> R2rmlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| R2rmlError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Validate the document and compile it into a mapping
    pub fn compile(self) -> R2rmlResult<CompiledR2rmlMapping> {
        let triples_maps = MappingExtractor::new(self.document).extract_all()?;
        CompiledR2rmlMapping::new(triples_maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{LogicalTable, TermSource, TermType};

    const SIMPLE_MAPPING: &str = r##"{
        "triplesMaps": [
            {
                "id": "#Airline",
                "logicalTable": { "tableName": "airlines" },
                "subjectMap": {
                    "template": "http://example.org/airline/{id}",
                    "class": "http://example.org/Airline"
                },
                "predicateObjectMaps": [
                    { "predicate": "http://example.org/name", "objectMap": { "column": "name" } }
                ]
            },
            {
                "id": "#Route",
                "logicalTable": { "sqlQuery": "SELECT id,\n  airline_id FROM routes" },
                "subjectMap": { "column": "id", "termType": "BlankNode", "graphs": ["http://example.org/g"] },
                "predicateObjectMaps": [
                    {
                        "predicateMap": { "template": "http://example.org/p/{id}" },
                        "objectMap": { "constant": "http://example.org/x", "termType": "IRI" },
                        "graphColumns": ["g"]
                    }
                ],
                "refPredicateObjectMaps": [
                    {
                        "predicate": "http://example.org/airline",
                        "objectMap": {
                            "parentTriplesMap": "#Airline",
                            "joinCondition": "{child.airline_id} = {parent.id}"
                        }
                    }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_compile() {
        let mapping = R2rmlLoader::from_json(SIMPLE_MAPPING)
            .unwrap()
            .compile()
            .unwrap();
        assert_eq!(mapping.len(), 2);

        let airline = mapping.get("#Airline").unwrap();
        assert_eq!(airline.table_name(), Some("airlines"));
        assert_eq!(airline.subject_map.classes, vec!["http://example.org/Airline"]);

        let route = mapping.get("#Route").unwrap();
        assert_eq!(
            route.logical_table,
            LogicalTable::Query("SELECT id, airline_id FROM routes".into())
        );
        assert_eq!(route.subject_map.term_type, TermType::BlankNode);
        assert_eq!(route.subject_map.graphs.constants, vec!["http://example.org/g"]);
        let pom = &route.predicate_object_maps[0];
        assert!(matches!(pom.predicate_map.source, TermSource::Template(_)));
        assert_eq!(pom.object_map.term_type, TermType::Iri);
        assert_eq!(pom.graphs.columns, vec!["g"]);
        assert_eq!(
            route.ref_predicate_object_maps[0].ref_object_map.child_columns(),
            vec!["airline_id"]
        );
    }

    #[test]
    fn test_missing_subject_map() {
        let doc = r##"{"triplesMaps": [{
            "id": "#T", "logicalTable": {"tableName": "T"},
            "predicateObjectMaps": [{"predicate": "http://ex/p", "objectMap": {"column": "A"}}]
        }]}"##;
        let err = R2rmlLoader::from_json(doc).unwrap().compile().unwrap_err();
        assert!(matches!(err, R2rmlError::MissingProperty(_)));
    }

    #[test]
    fn test_ambiguous_object_source() {
        let doc = r##"{"triplesMaps": [{
            "id": "#T", "logicalTable": {"tableName": "T"},
            "subjectMap": {"template": "http://ex/{A}"},
            "predicateObjectMaps": [{"predicate": "http://ex/p",
                "objectMap": {"column": "A", "constant": "x"}}]
        }]}"##;
        let err = R2rmlLoader::from_json(doc).unwrap().compile().unwrap_err();
        assert!(matches!(err, R2rmlError::AmbiguousValueSource { found: 2, .. }));
    }

    #[test]
    fn test_literal_subject_rejected() {
        let doc = r##"{"triplesMaps": [{
            "id": "#T", "logicalTable": {"tableName": "T"},
            "subjectMap": {"column": "A", "termType": "Literal"},
            "predicateObjectMaps": [{"predicate": "http://ex/p", "objectMap": {"column": "A"}}]
        }]}"##;
        let err = R2rmlLoader::from_json(doc).unwrap().compile().unwrap_err();
        assert!(matches!(err, R2rmlError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_term_type() {
        let doc = r##"{"triplesMaps": [{
            "id": "#T", "logicalTable": {"tableName": "T"},
            "subjectMap": {"column": "A", "termType": "Resource"},
            "predicateObjectMaps": [{"predicate": "http://ex/p", "objectMap": {"column": "A"}}]
        }]}"##;
        assert!(R2rmlLoader::from_json(doc).unwrap().compile().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            R2rmlLoader::from_json("{ not json"),
            Err(R2rmlError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, SIMPLE_MAPPING).unwrap();

        let mapping = R2rmlLoader::from_path(&path).unwrap().compile().unwrap();
        assert_eq!(mapping.len(), 2);

        let missing = dir.path().join("absent.json");
        match R2rmlLoader::from_path(&missing) {
            Err(R2rmlError::Parse(msg)) => assert!(msg.contains("absent.json")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
