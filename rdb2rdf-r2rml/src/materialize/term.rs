//! RDF term materialization
//!
//! Functions for generating RDF terms from one row of a logical table.
//! Rows are read through [`ColumnValues`], implemented both for a
//! positioned [`RowCursor`] and for a plain `HashMap`, which keeps the
//! functions easy to exercise in isolation.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rdb2rdf_graph_ir::Term;
use rdb2rdf_relational::{RowCursor, SqlType};
use rdb2rdf_vocab::xsd;

use crate::error::R2rmlResult;
use crate::mapping::{GraphMaps, ObjectMap, PredicateMap, SubjectMap, Template, TermSource, TermType};
use crate::vocab::R2RML;

/// Read access to the column values of the current row
pub trait ColumnValues {
    /// Value of `column`; `Ok(None)` is NULL
    fn value(&self, column: &str) -> R2rmlResult<Option<&str>>;

    /// Declared SQL type of `column`, when known
    fn sql_type(&self, column: &str) -> Option<&SqlType>;
}

impl ColumnValues for RowCursor {
    fn value(&self, column: &str) -> R2rmlResult<Option<&str>> {
        Ok(self.get(column)?)
    }

    fn sql_type(&self, column: &str) -> Option<&SqlType> {
        RowCursor::sql_type(self, column)
    }
}

/// Absent keys read as NULL; no types are known.
impl ColumnValues for HashMap<String, Option<String>> {
    fn value(&self, column: &str) -> R2rmlResult<Option<&str>> {
        Ok(self.get(column).and_then(|v| v.as_deref()))
    }

    fn sql_type(&self, _column: &str) -> Option<&SqlType> {
        None
    }
}

/// Expand a template against a row
///
/// Values are IRI-escaped only when `term_type` is IRI. Returns `None` if
/// any referenced column is NULL.
pub fn expand_template(
    template: &Template,
    values: &impl ColumnValues,
    term_type: TermType,
) -> R2rmlResult<Option<String>> {
    if term_type.is_iri() {
        template.expand(|col| values.value(col), iri_escape)
    } else {
        template.expand(|col| values.value(col), str::to_string)
    }
}

/// Characters percent-encoded by [`iri_escape`]: everything outside the
/// unreserved set, the sub-delims, `:` and `@`.
const IRI_UNSAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// IRI-escape a string value for use in templates
pub fn iri_escape(value: &str) -> String {
    utf8_percent_encode(value, IRI_UNSAFE).to_string()
}

/// Turn an arbitrary value into a valid blank node label
///
/// ASCII alphanumerics and `-` pass through; everything else, `_`
/// included, becomes `_XX` per byte, so distinct values keep distinct
/// labels.
pub fn blank_label(value: &str) -> String {
    let mut label = String::with_capacity(value.len() + 1);
    if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
        label.push('b');
    }
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' => label.push(byte as char),
            _ => label.push_str(&format!("_{:02X}", byte)),
        }
    }
    label
}

/// Resolve a term source to its raw lexical value
fn source_value(
    source: &TermSource,
    values: &impl ColumnValues,
    term_type: TermType,
) -> R2rmlResult<Option<String>> {
    match source {
        TermSource::Constant(value) => Ok(Some(value.clone())),
        TermSource::Column(column) => Ok(values.value(column)?.map(str::to_string)),
        TermSource::Template(template) => expand_template(template, values, term_type),
    }
}

fn node(value: String, term_type: TermType) -> Term {
    match term_type {
        TermType::BlankNode => Term::blank(blank_label(&value)),
        TermType::Iri | TermType::Literal => Term::iri(value),
    }
}

/// Materialize the subject of the current row
///
/// Returns `None` if the subject value is NULL.
pub fn materialize_subject(
    subject_map: &SubjectMap,
    values: &impl ColumnValues,
) -> R2rmlResult<Option<Term>> {
    let value = source_value(&subject_map.source, values, subject_map.term_type)?;
    Ok(value.map(|v| node(v, subject_map.term_type)))
}

/// Materialize a predicate; predicates are always IRIs
pub fn materialize_predicate(
    predicate_map: &PredicateMap,
    values: &impl ColumnValues,
) -> R2rmlResult<Option<Term>> {
    let value = source_value(&predicate_map.source, values, TermType::Iri)?;
    Ok(value.map(Term::iri))
}

/// Materialize the object of the current row
///
/// A column literal without an explicit datatype or language takes its
/// datatype from the column's SQL type. String and unmapped types give a
/// plain literal.
pub fn materialize_object(
    object_map: &ObjectMap,
    values: &impl ColumnValues,
) -> R2rmlResult<Option<Term>> {
    let Some(value) = source_value(&object_map.source, values, object_map.term_type)? else {
        return Ok(None);
    };

    if !object_map.term_type.is_literal() {
        return Ok(Some(node(value, object_map.term_type)));
    }

    let datatype = match (&object_map.datatype, &object_map.source) {
        (Some(dt), _) => Some(dt.as_str()),
        (None, TermSource::Column(column)) => values
            .sql_type(column)
            .and_then(SqlType::xsd_datatype)
            .filter(|dt| !xsd::is_string(dt)),
        (None, _) => None,
    };

    Ok(Some(Term::literal(
        value,
        datatype,
        object_map.language.as_deref(),
    )))
}

/// Resolve graph maps to a set of graph targets
///
/// `None` in the result is the default graph. A NULL graph column or
/// template places the statement in the default graph. The result is
/// deduplicated and keeps first-seen order.
pub fn materialize_graphs(
    graphs: &GraphMaps,
    values: &impl ColumnValues,
) -> R2rmlResult<Vec<Option<Term>>> {
    let mut targets = Vec::new();

    for constant in &graphs.constants {
        push_graph(&mut targets, Some(constant.clone()));
    }
    for column in &graphs.columns {
        let value = values.value(column)?;
        if value.is_none() {
            tracing::warn!(column = %column, "null graph column, using the default graph");
        }
        push_graph(&mut targets, value.map(str::to_string));
    }
    for template in &graphs.templates {
        push_graph(&mut targets, expand_template(template, values, TermType::Iri)?);
    }

    Ok(targets)
}

fn push_graph(targets: &mut Vec<Option<Term>>, iri: Option<String>) {
    let target = iri
        .filter(|iri| !R2RML::is_default_graph(iri))
        .map(Term::iri);
    if !targets.contains(&target) {
        targets.push(target);
    }
}

/// Union of two graph target sets, keeping first-seen order
///
/// An empty union means the default graph.
pub fn union_graphs(subject: &[Option<Term>], own: &[Option<Term>]) -> Vec<Option<Term>> {
    let mut union = Vec::with_capacity(subject.len() + own.len());
    for target in subject.iter().chain(own) {
        if !union.contains(target) {
            union.push(target.clone());
        }
    }
    if union.is_empty() {
        union.push(None);
    }
    union
}
