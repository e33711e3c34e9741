//! R2RML execution engine
//!
//! Runs every TriplesMap of a [`CompiledR2rmlMapping`] against a
//! [`RelationalSource`] and hands the generated statements to a sink.
//!
//! Reference joins are answered from a parent lookup table: the parent
//! TriplesMap's logical table is scanned once per distinct set of parent
//! join columns, and each parent subject is filed under its join key.

use rdb2rdf_graph_ir::{StatementSink, Term};
use rdb2rdf_relational::{RelationalSource, RowCursor};
use rdb2rdf_vocab::rdf;
use rustc_hash::FxHashMap;

use crate::error::{R2rmlError, R2rmlResult};
use crate::mapping::{CompiledR2rmlMapping, RefPredicateObjectMap, TermSource, TriplesMap};
use crate::materialize::{
    materialize_graphs, materialize_object, materialize_predicate, materialize_subject,
    union_graphs,
};

/// Parent join key -> subjects of every parent row with that key.
///
/// A `None` subject is a parent row whose own subject is NULL.
type ParentLookup = FxHashMap<Vec<String>, Vec<Option<Term>>>;

/// Counters gathered during a run. Advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct R2rmlReport {
    /// Statements handed to the sink
    pub statements: usize,
    /// Subjects, predicates, objects or join keys skipped because a value was NULL
    pub skipped_null_terms: usize,
    /// Reference objects skipped because no parent row matched
    pub unresolved_joins: usize,
}

/// Execute `mapping` against `source`, writing into `sink`.
pub fn execute_mapping<S: RelationalSource + ?Sized>(
    mapping: &CompiledR2rmlMapping,
    source: &S,
    sink: &mut impl StatementSink,
) -> R2rmlResult<R2rmlReport> {
    R2rmlEngine::new(mapping, source).run(sink)
}

/// Stateful execution of one mapping over one source.
pub struct R2rmlEngine<'a, S: RelationalSource + ?Sized> {
    mapping: &'a CompiledR2rmlMapping,
    source: &'a S,
    /// Keyed by (parent TriplesMap id, parent join columns)
    parent_lookups: FxHashMap<(String, Vec<String>), ParentLookup>,
    report: R2rmlReport,
}

impl<'a, S: RelationalSource + ?Sized> R2rmlEngine<'a, S> {
    pub fn new(mapping: &'a CompiledR2rmlMapping, source: &'a S) -> Self {
        Self {
            mapping,
            source,
            parent_lookups: FxHashMap::default(),
            report: R2rmlReport::default(),
        }
    }

    pub fn report(&self) -> R2rmlReport {
        self.report
    }

    /// Run every TriplesMap in declaration order.
    pub fn run(&mut self, sink: &mut impl StatementSink) -> R2rmlResult<R2rmlReport> {
        let mapping = self.mapping;
        for tm in mapping.triples_maps() {
            self.run_triples_map(tm, sink)?;
        }
        tracing::info!(
            statements = self.report.statements,
            skipped_null_terms = self.report.skipped_null_terms,
            unresolved_joins = self.report.unresolved_joins,
            "R2RML mapping complete"
        );
        Ok(self.report)
    }

    /// Run a single TriplesMap over its logical table.
    pub fn run_triples_map(
        &mut self,
        tm: &TriplesMap,
        sink: &mut impl StatementSink,
    ) -> R2rmlResult<()> {
        let sql = tm.logical_table.effective_sql();
        let mut cursor = self.source.run_query(&sql)?;
        tracing::debug!(triples_map = %tm.id, rows = cursor.len(), sql = %sql, "Running TriplesMap");

        warn_untyped_columns(tm, &cursor);
        while cursor.advance() {
            self.process_row(tm, &cursor, sink)?;
        }
        Ok(())
    }

    fn process_row(
        &mut self,
        tm: &TriplesMap,
        row: &RowCursor,
        sink: &mut impl StatementSink,
    ) -> R2rmlResult<()> {
        let Some(subject) = materialize_subject(&tm.subject_map, row)? else {
            tracing::debug!(triples_map = %tm.id, row = ?row.position(), "Null subject, row skipped");
            self.report.skipped_null_terms += 1;
            return Ok(());
        };
        let subject_graphs = materialize_graphs(&tm.subject_map.graphs, row)?;

        if !tm.subject_map.classes.is_empty() {
            let rdf_type = Term::iri(rdf::TYPE);
            let graphs = union_graphs(&subject_graphs, &[]);
            for class in &tm.subject_map.classes {
                self.emit(sink, &subject, &rdf_type, &Term::iri(class), &graphs)?;
            }
        }

        for pom in &tm.predicate_object_maps {
            let Some(predicate) = materialize_predicate(&pom.predicate_map, row)? else {
                self.report.skipped_null_terms += 1;
                continue;
            };
            let Some(object) = materialize_object(&pom.object_map, row)? else {
                self.report.skipped_null_terms += 1;
                continue;
            };
            let graphs = union_graphs(&subject_graphs, &materialize_graphs(&pom.graphs, row)?);
            self.emit(sink, &subject, &predicate, &object, &graphs)?;
        }

        for rpom in &tm.ref_predicate_object_maps {
            let Some(object) = self.resolve_join(tm, rpom, row)? else {
                continue;
            };
            let predicate = Term::iri(&rpom.predicate_map.predicate);
            let graphs = union_graphs(&subject_graphs, &materialize_graphs(&rpom.graphs, row)?);
            self.emit(sink, &subject, &predicate, &object, &graphs)?;
        }

        Ok(())
    }

    /// Find the parent subject joined to the current child row.
    fn resolve_join(
        &mut self,
        tm: &TriplesMap,
        rpom: &RefPredicateObjectMap,
        row: &RowCursor,
    ) -> R2rmlResult<Option<Term>> {
        let rom = &rpom.ref_object_map;

        let mut key = Vec::with_capacity(rom.join_conditions.len());
        for column in rom.child_columns() {
            match row.get(column)? {
                Some(value) => key.push(value.to_string()),
                None => {
                    // NULL never equals anything, so no parent can match.
                    self.report.skipped_null_terms += 1;
                    return Ok(None);
                }
            }
        }

        let parent_columns: Vec<String> =
            rom.parent_columns().into_iter().map(str::to_string).collect();
        let matches = {
            let lookup = self.parent_lookup(&rom.parent_triples_map, parent_columns)?;
            lookup.get(&key).cloned().unwrap_or_default()
        };

        match matches.as_slice() {
            [] => {
                tracing::warn!(
                    triples_map = %tm.id,
                    parent = %rom.parent_triples_map,
                    key = ?key,
                    "Join matched no parent row, reference skipped"
                );
                self.report.unresolved_joins += 1;
                Ok(None)
            }
            [Some(subject)] => Ok(Some(subject.clone())),
            [None] => {
                self.report.skipped_null_terms += 1;
                Ok(None)
            }
            many => Err(R2rmlError::DuplicateJoinMatch {
                triples_map: tm.id.clone(),
                parent: rom.parent_triples_map.clone(),
                matches: many.len(),
            }),
        }
    }

    fn parent_lookup(
        &mut self,
        parent_id: &str,
        parent_columns: Vec<String>,
    ) -> R2rmlResult<&ParentLookup> {
        let cache_key = (parent_id.to_string(), parent_columns);
        if !self.parent_lookups.contains_key(&cache_key) {
            let mapping = self.mapping;
            let parent = mapping
                .get(parent_id)
                .ok_or_else(|| R2rmlError::UnknownTriplesMap(parent_id.to_string()))?;
            let lookup = build_parent_lookup(self.source, parent, &cache_key.1)?;
            self.parent_lookups.insert(cache_key.clone(), lookup);
        }
        Ok(&self.parent_lookups[&cache_key])
    }

    /// Emit one statement per graph target.
    fn emit(
        &mut self,
        sink: &mut impl StatementSink,
        subject: &Term,
        predicate: &Term,
        object: &Term,
        graphs: &[Option<Term>],
    ) -> R2rmlResult<()> {
        for graph in graphs {
            sink.emit_parts(subject.clone(), predicate.clone(), object.clone(), graph.clone())?;
            self.report.statements += 1;
        }
        Ok(())
    }
}

/// Build a parent lookup table for RefObjectMap joins.
///
/// Parent rows with a NULL join column can never match and are left out.
fn build_parent_lookup<S: RelationalSource + ?Sized>(
    source: &S,
    parent_tm: &TriplesMap,
    parent_columns: &[String],
) -> R2rmlResult<ParentLookup> {
    let mut lookup = ParentLookup::default();
    let mut cursor = source.run_query(&parent_tm.logical_table.effective_sql())?;

    'rows: while cursor.advance() {
        let mut key = Vec::with_capacity(parent_columns.len());
        for column in parent_columns {
            match cursor.get(column)? {
                Some(value) => key.push(value.to_string()),
                None => continue 'rows,
            }
        }
        let subject = materialize_subject(&parent_tm.subject_map, &cursor)?;
        lookup.entry(key).or_default().push(subject);
    }

    tracing::debug!(
        parent_tm = %parent_tm.id,
        lookup_size = lookup.len(),
        "Built parent lookup table for RefObjectMap join"
    );

    Ok(lookup)
}

/// Warn once per column whose SQL type has no literal datatype.
fn warn_untyped_columns(tm: &TriplesMap, cursor: &RowCursor) {
    for pom in &tm.predicate_object_maps {
        let om = &pom.object_map;
        if !om.term_type.is_literal() || om.datatype.is_some() || om.language.is_some() {
            continue;
        }
        let TermSource::Column(column) = &om.source else {
            continue;
        };
        if let Some(sql_type) = cursor.sql_type(column) {
            if sql_type.xsd_datatype().is_none() {
                tracing::warn!(
                    triples_map = %tm.id,
                    column = %column,
                    sql_type = %sql_type,
                    "SQL type has no literal datatype, values become plain literals"
                );
            }
        }
    }
}
