//! Serializable relational snapshot.
//!
//! A snapshot is the extracted schema and rows of a database, in the shape
//! an extractor produces and [`crate::Database::new`] consumes. It doubles
//! as the JSON input format of the in-memory source:
//!
//! ```json
//! {
//!   "tables": [{
//!     "name": "orders",
//!     "columns": [{"name": "id", "type": "INT"}, {"name": "customer_id", "type": "INT"}],
//!     "primary_key": ["id"],
//!     "foreign_keys": [{"columns": ["customer_id"],
//!                       "references": {"table": "customers", "columns": ["id"]}}],
//!     "rows": [[1, 7]]
//!   }],
//!   "queries": []
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::SqlType;

/// A column declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: SqlType,
}

/// Referenced side of a foreign key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyRef {
    pub table: String,
    pub columns: Vec<String>,
}

/// A foreign key declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForeignKeyDef {
    pub columns: Vec<String>,
    pub references: KeyRef,
}

/// Schema and rows of one table.
///
/// Rows hold one value per column, in column order; `None` is NULL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableData {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub primary_key: Option<Vec<String>>,
    #[serde(default)]
    pub unique_keys: Vec<Vec<String>>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDef>,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            unique_keys: Vec::new(),
            foreign_keys: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append a column with a declared type such as `"VARCHAR(20)"`.
    pub fn column(mut self, name: impl Into<String>, sql_type: impl Into<SqlType>) -> Self {
        self.columns.push(ColumnDef {
            name: name.into(),
            sql_type: sql_type.into(),
        });
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn unique_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_keys
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn foreign_key<I, S, J, T>(mut self, columns: I, table: impl Into<String>, target: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.foreign_keys.push(ForeignKeyDef {
            columns: columns.into_iter().map(Into::into).collect(),
            references: KeyRef {
                table: table.into(),
                columns: target.into_iter().map(Into::into).collect(),
            },
        });
        self
    }

    /// Append a row; values are in column order, `None` is NULL.
    pub fn row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(values.into_iter().map(|v| v.map(Into::into)).collect());
        self
    }
}

/// The precomputed result of a query that is not a plain table scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryData {
    pub sql: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<Vec<Option<String>>>,
}

/// A complete relational snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub tables: Vec<TableData>,
    #[serde(default)]
    pub queries: Vec<QueryData>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Rows accept any JSON scalar: numbers and booleans keep their textual form.
fn deserialize_rows<'de, D>(deserializer: D) -> std::result::Result<Vec<Vec<Option<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let raw: Vec<Vec<Value>> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Value::Null => Ok(None),
                    Value::String(s) => Ok(Some(s)),
                    Value::Number(n) => Ok(Some(n.to_string())),
                    Value::Bool(b) => Ok(Some(b.to_string())),
                    other => Err(D::Error::custom(format!(
                        "row values must be scalars, found {other}"
                    ))),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_json() {
        let snap = Snapshot::from_json(
            r#"{
              "tables": [{
                "name": "orders",
                "columns": [{"name": "id", "type": "INT"}, {"name": "note", "type": "varchar(10)"}],
                "primary_key": ["id"],
                "rows": [[1, "x"], [2, null], ["3", true]]
              }],
              "queries": [{"sql": "SELECT 1 AS one", "columns": [{"name": "one", "type": "INT"}], "rows": [[1]]}]
            }"#,
        )
        .unwrap();

        let orders = &snap.tables[0];
        assert_eq!(orders.columns[1].sql_type, SqlType::Varchar);
        assert_eq!(orders.primary_key.as_deref(), Some(&["id".to_string()][..]));
        assert_eq!(orders.rows[0], vec![Some("1".to_string()), Some("x".to_string())]);
        assert_eq!(orders.rows[1][1], None);
        assert_eq!(orders.rows[2][1].as_deref(), Some("true"));
        assert_eq!(snap.queries[0].rows[0][0].as_deref(), Some("1"));
    }

    #[test]
    fn test_nested_row_values_rejected() {
        let err = Snapshot::from_json(
            r#"{"tables": [{"name": "t", "columns": [{"name": "a", "type": "TEXT"}], "rows": [[[1]]]}]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_builder() {
        let t = TableData::new("orders")
            .column("id", "INT")
            .column("customer_id", "INT")
            .primary_key(["id"])
            .foreign_key(["customer_id"], "customers", ["id"])
            .row([Some("1"), Some("7")]);
        assert_eq!(t.columns.len(), 2);
        assert_eq!(t.foreign_keys[0].references.table, "customers");
        assert_eq!(t.rows.len(), 1);
    }
}
