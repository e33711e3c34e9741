//! Tables, rows and keys.
//!
//! A [`Table`] never owns its rows directly: rows live in the database's
//! row arena and the table body lists their [`RowId`]s. A `RowId` is
//! therefore the identity of a logical database row, and two lookups of
//! the same row (direct iteration or dereference) always agree on it.

use std::collections::{BTreeMap, HashMap, HashSet};

use rustc_hash::FxHashMap;

use crate::error::{RelationalError, Result};
use crate::SqlType;

/// Stable identity of a row within a [`crate::Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u32);

impl RowId {
    /// Raw arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered column header: column name → declared SQL type.
#[derive(Debug, Clone, Default)]
pub struct Header {
    columns: Vec<(String, SqlType)>,
    name_to_index: HashMap<String, usize>,
}

impl Header {
    /// Build a header, rejecting duplicate column names.
    pub fn new(table: &str, columns: Vec<(String, SqlType)>) -> Result<Self> {
        let mut name_to_index = HashMap::with_capacity(columns.len());
        for (i, (name, _)) in columns.iter().enumerate() {
            if name_to_index.insert(name.clone(), i).is_some() {
                return Err(RelationalError::Schema(format!(
                    "duplicate column '{name}' in table '{table}'"
                )));
            }
        }
        Ok(Self {
            columns,
            name_to_index,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in declaration order.
    #[inline]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.name_to_index.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.name_to_index.contains_key(column)
    }

    /// Declared type of a column.
    pub fn sql_type(&self, column: &str) -> Option<&SqlType> {
        self.index_of(column).map(|i| &self.columns[i].1)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// (name, type) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlType)> + '_ {
        self.columns.iter().map(|(name, t)| (name.as_str(), t))
    }
}

/// One database row: owning table name plus column → value.
///
/// Values are kept sorted by column name. `None` is SQL NULL, which is
/// distinct from the string `"null"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    table: String,
    values: BTreeMap<String, Option<String>>,
}

impl Row {
    pub(crate) fn new(table: impl Into<String>, values: BTreeMap<String, Option<String>>) -> Self {
        Self {
            table: table.into(),
            values,
        }
    }

    /// Name of the owning table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Non-null value of a column. `None` for NULL or an absent column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    /// True when the column exists and holds NULL.
    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.values.get(column), Some(None))
    }

    /// All (column, value) pairs, sorted by column name.
    pub fn values(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.values
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }
}

/// Kind of a candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Primary,
    Unique,
    Foreign,
}

/// Ordered list of columns of one table that identifies rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateKey {
    table: String,
    columns: Vec<String>,
    kind: KeyKind,
}

impl CandidateKey {
    pub fn new(table: impl Into<String>, columns: Vec<String>, kind: KeyKind) -> Self {
        Self {
            table: table.into(),
            columns,
            kind,
        }
    }

    /// Owning table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn is_primary(&self) -> bool {
        self.kind == KeyKind::Primary
    }

    /// Same set of column names, ignoring order.
    pub fn match_same_columns(&self, other: &CandidateKey) -> bool {
        if self.columns.len() != other.columns.len() {
            return false;
        }
        let mine: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        other.columns.iter().all(|c| mine.contains(c.as_str()))
    }
}

/// A foreign key: a candidate key of kind `Foreign` plus the key it references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    key: CandidateKey,
    target: CandidateKey,
}

impl ForeignKey {
    /// `columns` of `table` reference `target_columns` of `target_table`,
    /// aligned by position.
    pub fn new(
        table: impl Into<String>,
        columns: Vec<String>,
        target_table: impl Into<String>,
        target_columns: Vec<String>,
    ) -> Self {
        Self {
            key: CandidateKey::new(table, columns, KeyKind::Foreign),
            target: CandidateKey::new(target_table, target_columns, KeyKind::Unique),
        }
    }

    /// The referencing side as a candidate key.
    pub fn key(&self) -> &CandidateKey {
        &self.key
    }

    /// Owning (referencing) table name.
    pub fn table(&self) -> &str {
        self.key.table()
    }

    /// Referencing columns in declared order.
    pub fn columns(&self) -> &[String] {
        self.key.columns()
    }

    /// The referenced key.
    pub fn target(&self) -> &CandidateKey {
        &self.target
    }

    pub fn target_table(&self) -> &str {
        self.target.table()
    }

    /// Exactly one column.
    pub fn is_unary(&self) -> bool {
        self.key.columns.len() == 1
    }
}

/// Per-foreign-key lookup: referenced-column values → rows holding them.
pub(crate) type KeyIndex = FxHashMap<Vec<String>, Vec<RowId>>;

/// A table: header, keys, body and the indexes incoming foreign keys need.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) name: String,
    pub(crate) header: Header,
    pub(crate) candidate_keys: Vec<CandidateKey>,
    pub(crate) foreign_keys: Vec<ForeignKey>,
    pub(crate) body: Vec<RowId>,
    /// Keyed by the referenced column list, in the order the referencing
    /// foreign key declares it.
    pub(crate) indexes: HashMap<Vec<String>, KeyIndex>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The primary key, if declared.
    pub fn primary_key(&self) -> Option<&CandidateKey> {
        self.candidate_keys.iter().find(|k| k.is_primary())
    }

    pub fn candidate_keys(&self) -> &[CandidateKey] {
        &self.candidate_keys
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Row identities in insertion order.
    pub fn rows(&self) -> &[RowId] {
        &self.body
    }

    /// Columns not covered by a unary foreign key, in header order.
    pub fn lexical_columns(&self) -> Vec<&str> {
        let referencing: HashSet<&str> = self
            .foreign_keys
            .iter()
            .filter(|fk| fk.is_unary())
            .map(|fk| fk.columns()[0].as_str())
            .collect();
        self.header
            .column_names()
            .filter(|c| !referencing.contains(c))
            .collect()
    }

    /// The foreign key whose columns are exactly the primary key, if any.
    pub fn primary_key_delegate(&self) -> Option<&ForeignKey> {
        let pk = self.primary_key()?;
        self.foreign_keys
            .iter()
            .find(|fk| fk.key().match_same_columns(pk))
    }

    /// Whether `fk` is one of this table's declared foreign keys.
    pub fn owns(&self, fk: &ForeignKey) -> bool {
        fk.table() == self.name && self.foreign_keys.contains(fk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_same_columns_ignores_order() {
        let a = CandidateKey::new("t", cols(&["a", "b"]), KeyKind::Primary);
        let b = CandidateKey::new("t", cols(&["b", "a"]), KeyKind::Foreign);
        let c = CandidateKey::new("t", cols(&["a"]), KeyKind::Foreign);
        assert!(a.match_same_columns(&b));
        assert!(!a.match_same_columns(&c));
    }

    #[test]
    fn test_foreign_key_accessors() {
        let fk = ForeignKey::new("orders", cols(&["customer_id"]), "customers", cols(&["id"]));
        assert!(fk.is_unary());
        assert_eq!(fk.table(), "orders");
        assert_eq!(fk.target_table(), "customers");
        assert_eq!(fk.key().kind(), KeyKind::Foreign);
        assert_eq!(fk.target().columns(), &cols(&["id"])[..]);
    }

    #[test]
    fn test_header_rejects_duplicates() {
        let err = Header::new(
            "t",
            vec![
                ("a".to_string(), SqlType::Text),
                ("a".to_string(), SqlType::Text),
            ],
        );
        assert!(err.is_err());

        let header = Header::new(
            "t",
            vec![
                ("id".to_string(), SqlType::Int { unsigned: false }),
                ("name".to_string(), SqlType::Varchar),
            ],
        )
        .unwrap();
        assert_eq!(header.index_of("name"), Some(1));
        assert_eq!(header.sql_type("name"), Some(&SqlType::Varchar));
        assert_eq!(header.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_row_null_is_not_string_null() {
        let mut values = BTreeMap::new();
        values.insert("a".to_string(), None);
        values.insert("b".to_string(), Some("null".to_string()));
        let row = Row::new("t", values);

        assert!(row.is_null("a"));
        assert_eq!(row.get("a"), None);
        assert!(!row.is_null("b"));
        assert_eq!(row.get("b"), Some("null"));
        assert!(!row.is_null("missing"));
    }
}
