//! Direct Mapping engine
//!
//! Walks every table and row of a [`Database`] and emits the statements
//! the W3C Direct Mapping defines:
//!
//! - one `rdf:type` statement per row, typed by its table
//! - one literal statement per non-null lexical column
//! - one reference statement per row reachable through an ordinary foreign key
//!
//! A row whose primary key is itself a foreign key shares the identity of
//! the row it references (followed transitively). Its statements use that
//! row's subject.

use rdb2rdf_graph_ir::{Datatype, StatementSink, Term};
use rdb2rdf_relational::{Database, ForeignKey, RelationalError, RowId, Table};
use rdb2rdf_vocab::{rdf, xsd};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::DirectMappingConfig;
use crate::error::{DirectMappingError, DirectResult};
use crate::uri::{encode_component, is_valid_uri};

/// Counters gathered during a run. Advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectMappingReport {
    /// Statements handed to the sink
    pub statements: usize,
    /// Foreign key values that matched no row
    pub broken_references: usize,
    /// Blank nodes allocated for rows without a primary key
    pub blank_nodes: usize,
    /// Non-null values skipped because the column holds bytes
    pub skipped_blob_values: usize,
    /// Distinct generated IRIs that failed the generic URI grammar
    pub invalid_uris: usize,
    /// Subjects built from a primary key with a NULL column
    pub null_key_subjects: usize,
}

/// Map a whole database into `sink`.
pub fn map_database(
    db: &Database,
    config: &DirectMappingConfig,
    sink: &mut impl StatementSink,
) -> DirectResult<DirectMappingReport> {
    let mut mapper = DirectMapper::new(db, config);
    mapper.convert_database(sink)?;
    Ok(mapper.report())
}

/// Stateful Direct Mapping run over one database.
///
/// Subjects are memoized by [`RowId`], so each row gets exactly one IRI or
/// blank node for the lifetime of the mapper.
pub struct DirectMapper<'a> {
    db: &'a Database,
    config: &'a DirectMappingConfig,
    subjects: FxHashMap<RowId, Term>,
    // Class and predicate IRIs already validated
    checked_iris: FxHashSet<String>,
    report: DirectMappingReport,
}

impl<'a> DirectMapper<'a> {
    pub fn new(db: &'a Database, config: &'a DirectMappingConfig) -> Self {
        Self {
            db,
            config,
            subjects: FxHashMap::default(),
            checked_iris: FxHashSet::default(),
            report: DirectMappingReport::default(),
        }
    }

    /// Counters so far.
    pub fn report(&self) -> DirectMappingReport {
        self.report
    }

    pub fn broken_references(&self) -> usize {
        self.report.broken_references
    }

    pub fn convert_database(&mut self, sink: &mut impl StatementSink) -> DirectResult<()> {
        let db = self.db;
        for table in db.tables() {
            self.convert_table(table, sink)?;
        }
        tracing::info!(
            statements = self.report.statements,
            broken_references = self.report.broken_references,
            blank_nodes = self.report.blank_nodes,
            invalid_uris = self.report.invalid_uris,
            "Direct mapping complete"
        );
        Ok(())
    }

    pub fn convert_table(&mut self, table: &Table, sink: &mut impl StatementSink) -> DirectResult<()> {
        tracing::debug!(table = %table.name(), rows = table.rows().len(), "Converting table");
        for (column, sql_type) in table.header().iter() {
            if sql_type.is_blob() {
                tracing::warn!(
                    table = %table.name(),
                    column,
                    sql_type = %sql_type,
                    "Binary column has no literal form, its values are skipped"
                );
            }
        }
        for &row in table.rows() {
            self.convert_row(row, sink)?;
        }
        Ok(())
    }

    /// Emit every statement generated by one row.
    pub fn convert_row(&mut self, row_id: RowId, sink: &mut impl StatementSink) -> DirectResult<()> {
        let db = self.db;
        let table = owning_table(db, row_id)?;
        let lexical = table.lexical_columns();

        let mut subject = self.subject_node(table, row_id)?;
        // Buffered until the final subject is known.
        let mut references: Vec<(Term, Term)> = Vec::new();
        let mut delegated: Vec<(Term, Term)> = Vec::new();

        let primary_key = table.primary_key();
        for fk in table.foreign_keys() {
            if primary_key.is_some_and(|pk| fk.key().match_same_columns(pk)) {
                match self.follow_primary_chain(row_id, fk)? {
                    Some(root) => {
                        subject = self.subject_node(owning_table(db, root)?, root)?;
                        for column in fk.columns() {
                            if lexical.contains(&column.as_str()) {
                                continue;
                            }
                            if let Some(literal) = self.literal(table, row_id, column)? {
                                delegated.push((self.column_predicate(table, column), literal));
                            }
                        }
                    }
                    None => {
                        self.report.broken_references += 1;
                        tracing::warn!(
                            table = %table.name(),
                            foreign_key = %fk.columns().join(","),
                            "Broken reference while resolving a primary key shared with another table"
                        );
                    }
                }
                continue;
            }

            let targets = db.dereference(row_id, fk)?;
            if targets.is_empty() {
                if db.reference_values(row_id, fk).is_some() {
                    self.report.broken_references += 1;
                    tracing::warn!(
                        table = %table.name(),
                        foreign_key = %fk.columns().join(","),
                        target = %fk.target_table(),
                        "Broken reference"
                    );
                }
                continue;
            }
            let target_table = db
                .table(fk.target_table())
                .ok_or_else(|| RelationalError::UnknownTable(fk.target_table().to_string()))?;
            let predicate = self.reference_predicate(table, fk);
            for &target in targets {
                let object = self.subject_node(target_table, target)?;
                references.push((predicate.clone(), object));
            }
        }

        let class = self.table_class(table);
        self.emit(sink, &subject, Term::iri(rdf::TYPE), class)?;
        for column in lexical {
            if let Some(literal) = self.literal(table, row_id, column)? {
                let predicate = self.column_predicate(table, column);
                self.emit(sink, &subject, predicate, literal)?;
            }
        }
        for (predicate, object) in references.into_iter().chain(delegated) {
            self.emit(sink, &subject, predicate, object)?;
        }
        Ok(())
    }

    /// Subject of a row: an IRI built from its primary key, or a blank node.
    pub fn subject_node(&mut self, table: &Table, row_id: RowId) -> DirectResult<Term> {
        if let Some(term) = self.subjects.get(&row_id) {
            return Ok(term.clone());
        }

        let term = match table.primary_key() {
            Some(pk) => {
                let db = self.db;
                let row = db.row(row_id);
                let null_columns: Vec<&str> = pk
                    .columns()
                    .iter()
                    .filter(|c| row.is_null(c))
                    .map(String::as_str)
                    .collect();
                if !null_columns.is_empty() {
                    self.report.null_key_subjects += 1;
                    tracing::warn!(
                        table = %table.name(),
                        columns = %null_columns.join(","),
                        "Primary key column is NULL, subject IRI has an empty key value"
                    );
                }
                let key = pk
                    .columns()
                    .iter()
                    .map(|c| {
                        format!(
                            "{}={}",
                            encode_component(c),
                            encode_component(row.get(c).unwrap_or_default())
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                let iri = format!(
                    "{}{}/{}",
                    self.config.base_uri,
                    encode_component(table.name()),
                    key
                );
                if !is_valid_uri(&iri) {
                    self.report.invalid_uris += 1;
                    tracing::warn!(iri = %iri, table = %table.name(), "Generated subject is not a valid URI");
                }
                Term::iri(iri)
            }
            None => {
                self.report.blank_nodes += 1;
                Term::blank(format!("b{}", self.report.blank_nodes))
            }
        };
        self.subjects.insert(row_id, term.clone());
        Ok(term)
    }

    /// Follow a primary key that is also a foreign key until a table whose
    /// primary key is not delegated further. `None` on a broken link.
    fn follow_primary_chain(&self, row_id: RowId, fk: &ForeignKey) -> DirectResult<Option<RowId>> {
        let db = self.db;
        let mut current = row_id;
        let mut via = fk;
        let mut visited = FxHashSet::default();
        visited.insert(row_id);

        loop {
            let targets = db.dereference(current, via)?;
            let Some(&next) = targets.first() else {
                return Ok(None);
            };
            if targets.len() > 1 {
                tracing::warn!(
                    table = %via.table(),
                    target = %via.target_table(),
                    matches = targets.len(),
                    "Primary key reference matched several rows, using the first"
                );
            }
            if !visited.insert(next) {
                tracing::warn!(table = %via.target_table(), "Primary key references form a cycle");
                return Ok(Some(next));
            }
            match owning_table(db, next)?.primary_key_delegate() {
                Some(delegate) => {
                    current = next;
                    via = delegate;
                }
                None => return Ok(Some(next)),
            }
        }
    }

    /// Literal for one column of a row; `None` for NULL or binary values.
    fn literal(&mut self, table: &Table, row_id: RowId, column: &str) -> DirectResult<Option<Term>> {
        let Some(value) = self.db.row(row_id).get(column) else {
            return Ok(None);
        };
        let sql_type = table
            .header()
            .sql_type(column)
            .ok_or_else(|| RelationalError::UnknownColumn {
                column: column.to_string(),
                table: table.name().to_string(),
            })?;
        if sql_type.is_blob() {
            self.report.skipped_blob_values += 1;
            return Ok(None);
        }
        match sql_type.xsd_datatype() {
            Some(datatype) if xsd::is_string(datatype) => Ok(Some(Term::string(value))),
            Some(datatype) => Ok(Some(Term::typed(value, Datatype::from_iri(datatype)))),
            None => Err(DirectMappingError::UnmappedSqlType {
                table: table.name().to_string(),
                column: column.to_string(),
                sql_type: sql_type.to_string(),
            }),
        }
    }

    fn table_class(&mut self, table: &Table) -> Term {
        let iri = format!("{}{}", self.config.base_uri, encode_component(table.name()));
        self.checked_iri(iri, "class")
    }

    fn column_predicate(&mut self, table: &Table, column: &str) -> Term {
        let iri = format!(
            "{}{}#{}",
            self.config.base_uri,
            encode_component(table.name()),
            encode_component(column)
        );
        self.checked_iri(iri, "predicate")
    }

    fn reference_predicate(&mut self, table: &Table, fk: &ForeignKey) -> Term {
        let columns = fk
            .columns()
            .iter()
            .map(|c| encode_component(c))
            .collect::<Vec<_>>()
            .join(",");
        let iri = format!(
            "{}{}#{}",
            self.config.base_uri,
            encode_component(table.name()),
            columns
        );
        self.checked_iri(iri, "predicate")
    }

    /// Validate a class or predicate IRI the first time it is generated.
    fn checked_iri(&mut self, iri: String, role: &'static str) -> Term {
        if !self.checked_iris.contains(&iri) {
            if !is_valid_uri(&iri) {
                self.report.invalid_uris += 1;
                tracing::warn!(iri = %iri, role, "Generated IRI is not a valid URI");
            }
            self.checked_iris.insert(iri.clone());
        }
        Term::iri(iri)
    }

    fn emit(
        &mut self,
        sink: &mut impl StatementSink,
        subject: &Term,
        predicate: Term,
        object: Term,
    ) -> DirectResult<()> {
        sink.emit_parts(subject.clone(), predicate, object, None)?;
        self.report.statements += 1;
        Ok(())
    }
}

fn owning_table(db: &Database, row_id: RowId) -> DirectResult<&Table> {
    db.table_of(row_id).ok_or_else(|| {
        DirectMappingError::from(RelationalError::UnknownTable(
            db.row(row_id).table().to_string(),
        ))
    })
}
