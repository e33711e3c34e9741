//! TriplesMap and logical table definitions

use rdb2rdf_relational::normalize_sql;

use super::{PredicateObjectMap, RefPredicateObjectMap, SubjectMap};
use crate::error::{R2rmlError, R2rmlResult};

/// The rows a TriplesMap iterates over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalTable {
    /// `rr:tableName` - a base table or view
    Table(String),
    /// `rr:sqlQuery` - an arbitrary read query, whitespace-normalized
    Query(String),
}

impl LogicalTable {
    /// Build from the two mutually exclusive properties
    pub fn from_parts(table_name: Option<String>, sql_query: Option<String>) -> R2rmlResult<Self> {
        match (table_name, sql_query) {
            (Some(name), None) => Self::table(name),
            (None, Some(sql)) => Self::query(sql),
            (Some(_), Some(_)) => Err(R2rmlError::InvalidValue {
                property: "rr:logicalTable".to_string(),
                message: "set either rr:tableName or rr:sqlQuery, not both".to_string(),
            }),
            (None, None) => Err(R2rmlError::MissingProperty(
                "rr:tableName or rr:sqlQuery".to_string(),
            )),
        }
    }

    pub fn table(name: impl Into<String>) -> R2rmlResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(R2rmlError::InvalidValue {
                property: "rr:tableName".to_string(),
                message: "table name is empty".to_string(),
            });
        }
        Ok(LogicalTable::Table(name))
    }

    pub fn query(sql: impl AsRef<str>) -> R2rmlResult<Self> {
        let sql = normalize_sql(sql.as_ref());
        if sql.is_empty() {
            return Err(R2rmlError::InvalidValue {
                property: "rr:sqlQuery".to_string(),
                message: "query is empty".to_string(),
            });
        }
        Ok(LogicalTable::Query(sql))
    }

    /// The query that produces this logical table's rows
    pub fn effective_sql(&self) -> String {
        match self {
            LogicalTable::Table(name) if name.starts_with('"') => format!("SELECT * FROM {name}"),
            LogicalTable::Table(name) => format!("SELECT * FROM \"{name}\""),
            LogicalTable::Query(sql) => sql.clone(),
        }
    }
}

/// A complete TriplesMap definition
#[derive(Debug, Clone)]
pub struct TriplesMap {
    /// Identifier, referenced by `rr:parentTriplesMap`
    pub id: String,
    pub logical_table: LogicalTable,
    pub subject_map: SubjectMap,
    pub predicate_object_maps: Vec<PredicateObjectMap>,
    pub ref_predicate_object_maps: Vec<RefPredicateObjectMap>,
}

impl TriplesMap {
    /// Create a TriplesMap; it must carry at least one predicate-object map
    pub fn new(
        id: impl Into<String>,
        logical_table: LogicalTable,
        subject_map: SubjectMap,
        predicate_object_maps: Vec<PredicateObjectMap>,
        ref_predicate_object_maps: Vec<RefPredicateObjectMap>,
    ) -> R2rmlResult<Self> {
        let id = id.into();
        if predicate_object_maps.is_empty() && ref_predicate_object_maps.is_empty() {
            return Err(R2rmlError::MissingProperty(format!(
                "rr:predicateObjectMap in TriplesMap {id}"
            )));
        }
        Ok(Self {
            id,
            logical_table,
            subject_map,
            predicate_object_maps,
            ref_predicate_object_maps,
        })
    }

    /// Get the table name if this uses a table (not a query)
    pub fn table_name(&self) -> Option<&str> {
        match &self.logical_table {
            LogicalTable::Table(name) => Some(name),
            LogicalTable::Query(_) => None,
        }
    }
}
