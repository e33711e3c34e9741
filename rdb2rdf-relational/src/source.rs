//! Relational snapshot providers.
//!
//! A [`RelationalSource`] hands out the extracted [`Database`] and answers
//! read queries with independent, fully materialized cursors. Because each
//! query result is materialized up front, running a query while iterating
//! another cursor cannot disturb the outer cursor.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cursor::{ColumnMeta, ResultSet, RowCursor};
use crate::error::{RelationalError, Result};
use crate::snapshot::{Snapshot, TableData};
use crate::Database;

/// Collaborator that supplies a relational snapshot and runs queries on it.
pub trait RelationalSource {
    /// Extract schema and rows into an indexed [`Database`].
    fn extract(&self) -> Result<Database>;

    /// Run a read query and return a cursor positioned before the first row.
    fn run_query(&self, sql: &str) -> Result<RowCursor>;
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `SELECT <projection> FROM <table>` with optional quoting and `;`.
static TABLE_SCAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)^\s*select\s+(.+?)\s+from\s+[`"\[]?([^\s`"\];]+)[`"\]]?\s*;?\s*$"#)
        .expect("valid regex")
});

/// In-memory source backed by a [`Snapshot`].
///
/// Supports table scans (`SELECT * FROM t` or a plain column list) and any
/// query whose precomputed result the snapshot registers.
#[derive(Debug, Clone)]
pub struct MemorySource {
    tables: HashMap<String, TableData>,
    snapshot: Snapshot,
    queries: HashMap<String, ResultSet>,
}

impl MemorySource {
    pub fn new(snapshot: Snapshot) -> Result<Self> {
        let mut queries = HashMap::with_capacity(snapshot.queries.len());
        for query in &snapshot.queries {
            let columns = query
                .columns
                .iter()
                .map(|c| ColumnMeta {
                    name: c.name.clone(),
                    sql_type: c.sql_type.clone(),
                })
                .collect();
            let result = ResultSet::new(columns, query.rows.clone())?;
            queries.insert(normalize_sql(&query.sql), result);
        }
        let tables = snapshot
            .tables
            .iter()
            .map(|t| (t.name.clone(), t.clone()))
            .collect();
        Ok(Self {
            tables,
            snapshot,
            queries,
        })
    }

    fn scan(&self, table: &TableData, projection: &str) -> Result<ResultSet> {
        let all: Vec<ColumnMeta> = table
            .columns
            .iter()
            .map(|c| ColumnMeta {
                name: c.name.clone(),
                sql_type: c.sql_type.clone(),
            })
            .collect();

        if projection.trim() == "*" {
            return ResultSet::new(all, table.rows.clone());
        }

        let mut picked = Vec::new();
        for name in projection.split(',') {
            let name = name.trim().trim_matches(|c| c == '`' || c == '"');
            let index = all.iter().position(|c| c.name == name).ok_or_else(|| {
                RelationalError::UnknownColumn {
                    column: name.to_string(),
                    table: table.name.clone(),
                }
            })?;
            picked.push(index);
        }
        let columns = picked.iter().map(|&i| all[i].clone()).collect();
        let rows = table
            .rows
            .iter()
            .map(|row| picked.iter().map(|&i| row[i].clone()).collect())
            .collect();
        ResultSet::new(columns, rows)
    }
}

impl RelationalSource for MemorySource {
    fn extract(&self) -> Result<Database> {
        Database::new(self.snapshot.tables.clone())
    }

    fn run_query(&self, sql: &str) -> Result<RowCursor> {
        let normalized = normalize_sql(sql);
        if let Some(result) = self.queries.get(&normalized) {
            return Ok(result.clone().into_cursor());
        }

        if let Some(caps) = TABLE_SCAN_RE.captures(&normalized) {
            if let Some(table) = self.tables.get(&caps[2]) {
                tracing::debug!(table = %table.name, "Scanning snapshot table");
                return Ok(self.scan(table, &caps[1])?.into_cursor());
            }
            return Err(RelationalError::UnknownTable(caps[2].to_string()));
        }

        Err(RelationalError::Query(format!(
            "query is neither a table scan nor registered in the snapshot: {normalized}"
        )))
    }
}
