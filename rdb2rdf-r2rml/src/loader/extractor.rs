//! Conversion of a parsed mapping document into TriplesMaps
//!
//! Every structural rule is checked here, through the validating
//! constructors of the mapping types.

use super::document::{
    GraphsDoc, MappingDocument, ObjectMapDoc, PredicateObjectMapDoc, RefPredicateObjectMapDoc,
    SubjectMapDoc, TriplesMapDoc, ValueDoc,
};
use crate::error::{R2rmlError, R2rmlResult};
use crate::mapping::{
    GraphMaps, LogicalTable, ObjectMap, PredicateMap, PredicateObjectMap, RefObjectMap,
    RefPredicateMap, RefPredicateObjectMap, SubjectMap, TermSource, TermType, TriplesMap,
};

/// Extracts TriplesMap definitions from a [`MappingDocument`]
pub struct MappingExtractor {
    document: MappingDocument,
}

impl MappingExtractor {
    pub fn new(document: MappingDocument) -> Self {
        Self { document }
    }

    /// Extract all TriplesMaps in document order
    pub fn extract_all(self) -> R2rmlResult<Vec<TriplesMap>> {
        self.document
            .triples_maps
            .into_iter()
            .map(extract_triples_map)
            .collect()
    }
}

fn extract_triples_map(doc: TriplesMapDoc) -> R2rmlResult<TriplesMap> {
    let id = doc.id;
    let logical_table =
        LogicalTable::from_parts(doc.logical_table.table_name, doc.logical_table.sql_query)?;
    let subject_map = doc
        .subject_map
        .ok_or_else(|| R2rmlError::MissingProperty(format!("rr:subjectMap in TriplesMap {id}")))
        .and_then(extract_subject_map)?;
    let poms = doc
        .predicate_object_maps
        .into_iter()
        .map(extract_predicate_object_map)
        .collect::<R2rmlResult<Vec<_>>>()?;
    let ref_poms = doc
        .ref_predicate_object_maps
        .into_iter()
        .map(extract_ref_predicate_object_map)
        .collect::<R2rmlResult<Vec<_>>>()?;

    TriplesMap::new(id, logical_table, subject_map, poms, ref_poms)
}

fn extract_subject_map(doc: SubjectMapDoc) -> R2rmlResult<SubjectMap> {
    let source = extract_source("rr:subjectMap", doc.value)?;
    let term_type = extract_term_type(doc.term_type.as_deref())?;
    SubjectMap::new(
        source,
        term_type,
        doc.class.into_vec(),
        extract_graphs(doc.graphs)?,
    )
}

fn extract_predicate_object_map(doc: PredicateObjectMapDoc) -> R2rmlResult<PredicateObjectMap> {
    let predicate_map = match (doc.predicate, doc.predicate_map) {
        (Some(iri), None) => PredicateMap::constant(iri),
        (None, Some(map)) => PredicateMap::new(extract_source("rr:predicateMap", map)?),
        (Some(_), Some(_)) => {
            return Err(R2rmlError::InvalidValue {
                property: "rr:predicateObjectMap".to_string(),
                message: "set either predicate or predicateMap, not both".to_string(),
            })
        }
        (None, None) => {
            return Err(R2rmlError::MissingProperty(
                "rr:predicate or rr:predicateMap".to_string(),
            ))
        }
    };
    let object_map = extract_object_map(doc.object_map)?;
    Ok(PredicateObjectMap::new(predicate_map, object_map).with_graphs(extract_graphs(doc.graphs)?))
}

fn extract_object_map(doc: ObjectMapDoc) -> R2rmlResult<ObjectMap> {
    ObjectMap::new(
        extract_source("rr:objectMap", doc.value)?,
        extract_term_type(doc.term_type.as_deref())?,
        doc.datatype,
        doc.language,
    )
}

fn extract_ref_predicate_object_map(
    doc: RefPredicateObjectMapDoc,
) -> R2rmlResult<RefPredicateObjectMap> {
    let ref_object_map = RefObjectMap::new(
        doc.object_map.parent_triples_map,
        &doc.object_map.join_condition,
    )?;
    Ok(
        RefPredicateObjectMap::new(RefPredicateMap::constant(doc.predicate), ref_object_map)
            .with_graphs(extract_graphs(doc.graphs)?),
    )
}

fn extract_source(property: &str, doc: ValueDoc) -> R2rmlResult<TermSource> {
    TermSource::from_parts(property, doc.constant, doc.column, doc.template)
}

fn extract_term_type(term_type: Option<&str>) -> R2rmlResult<Option<TermType>> {
    term_type
        .map(|value| {
            TermType::from_iri(value).ok_or_else(|| R2rmlError::InvalidValue {
                property: "rr:termType".to_string(),
                message: format!("unknown term type '{value}'"),
            })
        })
        .transpose()
}

fn extract_graphs(doc: GraphsDoc) -> R2rmlResult<GraphMaps> {
    GraphMaps::from_parts(doc.graphs, doc.graph_columns, doc.graph_templates)
}
