//! Materialized query results and a positioned cursor over them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{RelationalError, Result};
use crate::SqlType;

/// Column metadata of a query result.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub sql_type: SqlType,
}

/// A fully materialized query result.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Vec<ColumnMeta>,
    name_to_index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    /// Build a result set; every row must have one value per column.
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some(bad) = rows.iter().position(|r| r.len() != columns.len()) {
            return Err(RelationalError::Query(format!(
                "result row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                columns.len()
            )));
        }
        let name_to_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Ok(Self {
            columns,
            name_to_index,
            rows,
        })
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Open a cursor positioned before the first row.
    pub fn into_cursor(self) -> RowCursor {
        RowCursor::new(Arc::new(self))
    }
}

/// Forward cursor with a "current row" pointer.
///
/// Cursors share their result set, so a clone is an independent cursor
/// over the same rows: advancing one never moves another.
#[derive(Debug, Clone)]
pub struct RowCursor {
    result: Arc<ResultSet>,
    position: Option<usize>,
}

impl RowCursor {
    pub fn new(result: Arc<ResultSet>) -> Self {
        Self {
            result,
            position: None,
        }
    }

    /// Move to the next row. Returns `false` once the rows are exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.result.rows.len() {
            self.position = Some(next);
            true
        } else {
            self.position = Some(self.result.rows.len());
            false
        }
    }

    /// Reposition before the first row.
    pub fn rewind(&mut self) {
        self.position = None;
    }

    /// Zero-based index of the current row.
    pub fn position(&self) -> Option<usize> {
        self.position.filter(|&p| p < self.result.rows.len())
    }

    /// Value of a column in the current row; `Ok(None)` is NULL.
    pub fn get(&self, column: &str) -> Result<Option<&str>> {
        let index = self.column_index(column)?;
        let row = self
            .position()
            .map(|p| &self.result.rows[p])
            .ok_or_else(|| RelationalError::Query("cursor is not positioned on a row".to_string()))?;
        Ok(row[index].as_deref())
    }

    /// Declared type of a result column.
    pub fn sql_type(&self, column: &str) -> Option<&SqlType> {
        self.result
            .name_to_index
            .get(column)
            .map(|&i| &self.result.columns[i].sql_type)
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.result.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.result.name_to_index.contains_key(column)
    }

    /// Number of rows in the underlying result.
    pub fn len(&self) -> usize {
        self.result.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.result
            .name_to_index
            .get(column)
            .copied()
            .ok_or_else(|| RelationalError::UnknownColumn {
                column: column.to_string(),
                table: "<query result>".to_string(),
            })
    }
}
