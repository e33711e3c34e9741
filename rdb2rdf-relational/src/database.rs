//! The relational model: tables, the row arena and foreign-key indexes.

use std::collections::{BTreeMap, HashMap};

use crate::error::{RelationalError, Result};
use crate::model::{CandidateKey, ForeignKey, Header, KeyIndex, KeyKind, Row, RowId, Table};
use crate::snapshot::TableData;

/// An immutable relational snapshot.
///
/// Built once from extracted [`TableData`]; every foreign key causes its
/// target table to hold an index keyed by the referenced columns, so
/// [`Database::dereference`] never scans.
#[derive(Debug, Clone)]
pub struct Database {
    tables: Vec<Table>,
    by_name: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl Database {
    /// Validate the schema, load the rows and build foreign-key indexes.
    pub fn new(tables: Vec<TableData>) -> Result<Self> {
        let mut db = Database {
            tables: Vec::with_capacity(tables.len()),
            by_name: HashMap::with_capacity(tables.len()),
            rows: Vec::new(),
        };

        for data in tables {
            db.add_table(data)?;
        }
        db.validate_foreign_keys()?;
        db.build_indexes();

        tracing::debug!(
            tables = db.tables.len(),
            rows = db.rows.len(),
            "Built relational model"
        );
        Ok(db)
    }

    fn add_table(&mut self, data: TableData) -> Result<()> {
        if self.by_name.contains_key(&data.name) {
            return Err(RelationalError::Schema(format!(
                "duplicate table name '{}'",
                data.name
            )));
        }
        let name = data.name;
        let header = Header::new(
            &name,
            data.columns
                .into_iter()
                .map(|c| (c.name, c.sql_type))
                .collect(),
        )?;

        let mut candidate_keys = Vec::new();
        if let Some(pk) = data.primary_key {
            check_key_columns(&name, &header, &pk)?;
            candidate_keys.push(CandidateKey::new(&name, pk, KeyKind::Primary));
        }
        for unique in data.unique_keys {
            check_key_columns(&name, &header, &unique)?;
            candidate_keys.push(CandidateKey::new(&name, unique, KeyKind::Unique));
        }

        let mut foreign_keys = Vec::with_capacity(data.foreign_keys.len());
        for fk in data.foreign_keys {
            check_key_columns(&name, &header, &fk.columns)?;
            if fk.columns.len() != fk.references.columns.len() {
                return Err(RelationalError::Schema(format!(
                    "foreign key ({}) of table '{}' has {} columns but references {}",
                    fk.columns.join(","),
                    name,
                    fk.columns.len(),
                    fk.references.columns.len()
                )));
            }
            foreign_keys.push(ForeignKey::new(
                &name,
                fk.columns,
                fk.references.table,
                fk.references.columns,
            ));
        }

        let table_index = self.tables.len();
        let mut body = Vec::with_capacity(data.rows.len());
        for (row_number, values) in data.rows.into_iter().enumerate() {
            if values.len() != header.len() {
                return Err(RelationalError::Schema(format!(
                    "row {} of table '{}' has {} values, header has {} columns",
                    row_number,
                    name,
                    values.len(),
                    header.len()
                )));
            }
            let values: BTreeMap<String, Option<String>> = header
                .column_names()
                .map(str::to_string)
                .zip(values)
                .collect();
            let id = RowId(u32::try_from(self.rows.len()).map_err(|_| {
                RelationalError::Schema("row count exceeds the arena capacity".to_string())
            })?);
            self.rows.push(Row::new(&name, values));
            body.push(id);
        }

        self.by_name.insert(name.clone(), table_index);
        self.tables.push(Table {
            name,
            header,
            candidate_keys,
            foreign_keys,
            body,
            indexes: HashMap::new(),
        });
        Ok(())
    }

    fn validate_foreign_keys(&self) -> Result<()> {
        for table in &self.tables {
            for fk in &table.foreign_keys {
                let target = self
                    .table(fk.target_table())
                    .ok_or_else(|| RelationalError::UnknownTable(fk.target_table().to_string()))?;
                check_key_columns(target.name(), target.header(), fk.target().columns())?;
            }
        }
        Ok(())
    }

    /// One index per distinct referenced column list, on the target table.
    fn build_indexes(&mut self) {
        let mut wanted: Vec<(usize, Vec<String>)> = Vec::new();
        for table in &self.tables {
            for fk in &table.foreign_keys {
                if let Some(&target) = self.by_name.get(fk.target_table()) {
                    let columns = fk.target().columns().to_vec();
                    if !wanted.iter().any(|(t, c)| *t == target && *c == columns) {
                        wanted.push((target, columns));
                    }
                }
            }
        }

        for (target, columns) in wanted {
            let index = build_index(&self.rows, &self.tables[target], &columns);
            tracing::debug!(
                table = %self.tables[target].name,
                columns = %columns.join(","),
                keys = index.len(),
                "Built foreign key index"
            );
            self.tables[target].indexes.insert(columns, index);
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    /// Tables in extraction order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The row with the given identity.
    ///
    /// `RowId`s are only handed out by this database, so the index is
    /// always in range.
    pub fn row(&self, id: RowId) -> &Row {
        &self.rows[id.index()]
    }

    /// The table a row belongs to.
    pub fn table_of(&self, id: RowId) -> Option<&Table> {
        self.table(self.row(id).table())
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of the foreign key's columns for a row, in the key's order.
    ///
    /// `None` when any of them is NULL: such a reference points nowhere
    /// and is not considered broken.
    pub fn reference_values(&self, id: RowId, fk: &ForeignKey) -> Option<Vec<String>> {
        let row = self.row(id);
        fk.columns()
            .iter()
            .map(|c| row.get(c).map(str::to_string))
            .collect()
    }

    /// Rows of the foreign key's target table referenced by `id`.
    ///
    /// An empty slice means the reference is NULL or unresolved. Using a
    /// foreign key that the row's table does not declare is an error.
    pub fn dereference(&self, id: RowId, fk: &ForeignKey) -> Result<&[RowId]> {
        let row = self.row(id);
        let owner = self
            .table(row.table())
            .ok_or_else(|| RelationalError::UnknownTable(row.table().to_string()))?;
        if !owner.owns(fk) {
            return Err(RelationalError::ForeignKeyNotOwned {
                fk_table: fk.table().to_string(),
                columns: fk.columns().join(","),
                row_table: row.table().to_string(),
            });
        }

        let Some(key) = self.reference_values(id, fk) else {
            return Ok(&[]);
        };
        let target = self
            .table(fk.target_table())
            .ok_or_else(|| RelationalError::UnknownTable(fk.target_table().to_string()))?;
        Ok(target
            .indexes
            .get(fk.target().columns())
            .and_then(|index| index.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }
}

fn check_key_columns(table: &str, header: &Header, columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Err(RelationalError::Schema(format!(
            "empty key declared on table '{table}'"
        )));
    }
    match columns.iter().find(|c| !header.contains(c)) {
        Some(missing) => Err(RelationalError::UnknownColumn {
            column: missing.clone(),
            table: table.to_string(),
        }),
        None => Ok(()),
    }
}

/// Group a table's rows by the values of `columns`. Rows with a NULL in
/// any of them can never be referenced and are left out.
fn build_index(rows: &[Row], table: &Table, columns: &[String]) -> KeyIndex {
    let mut index = KeyIndex::default();
    for &id in &table.body {
        let row = &rows[id.index()];
        let key: Option<Vec<String>> = columns
            .iter()
            .map(|c| row.get(c).map(str::to_string))
            .collect();
        if let Some(key) = key {
            index.entry(key).or_default().push(id);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> Vec<TableData> {
        vec![
            TableData::new("orders")
                .column("id", "INT")
                .column("customer_id", "INT")
                .primary_key(["id"])
                .foreign_key(["customer_id"], "customers", ["id"])
                .row([Some("1"), Some("7")])
                .row([Some("2"), Some("8")])
                .row([Some("3"), None]),
            TableData::new("customers")
                .column("id", "INT")
                .column("name", "VARCHAR(50)")
                .primary_key(["id"])
                .row([Some("7"), Some("Ann")]),
        ]
    }

    #[test]
    fn test_dereference_resolves_through_index() {
        let db = Database::new(shop()).unwrap();
        let orders = db.table("orders").unwrap();
        let fk = &orders.foreign_keys()[0];

        let first = orders.rows()[0];
        let targets = db.dereference(first, fk).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(db.row(targets[0]).get("name"), Some("Ann"));

        // Same identity as direct iteration over the target table
        assert_eq!(targets[0], db.table("customers").unwrap().rows()[0]);
    }

    #[test]
    fn test_dereference_broken_and_null() {
        let db = Database::new(shop()).unwrap();
        let orders = db.table("orders").unwrap();
        let fk = &orders.foreign_keys()[0];

        let broken = orders.rows()[1];
        assert!(db.dereference(broken, fk).unwrap().is_empty());
        assert!(db.reference_values(broken, fk).is_some());

        let null = orders.rows()[2];
        assert!(db.dereference(null, fk).unwrap().is_empty());
        assert!(db.reference_values(null, fk).is_none());
    }

    #[test]
    fn test_dereference_with_foreign_fk_is_fatal() {
        let db = Database::new(shop()).unwrap();
        let fk = db.table("orders").unwrap().foreign_keys()[0].clone();
        let customer = db.table("customers").unwrap().rows()[0];
        let err = db.dereference(customer, &fk).unwrap_err();
        assert!(matches!(err, RelationalError::ForeignKeyNotOwned { .. }));
    }

    #[test]
    fn test_schema_validation() {
        let dup = vec![TableData::new("t").column("a", "INT"), TableData::new("t")];
        assert!(matches!(
            Database::new(dup),
            Err(RelationalError::Schema(_))
        ));

        let bad_pk = vec![TableData::new("t").column("a", "INT").primary_key(["b"])];
        assert!(matches!(
            Database::new(bad_pk),
            Err(RelationalError::UnknownColumn { .. })
        ));

        let bad_target = vec![TableData::new("t")
            .column("a", "INT")
            .foreign_key(["a"], "nowhere", ["id"])];
        assert!(matches!(
            Database::new(bad_target),
            Err(RelationalError::UnknownTable(_))
        ));

        let short_row = vec![TableData::new("t")
            .column("a", "INT")
            .column("b", "INT")
            .row([Some("1")])];
        assert!(Database::new(short_row).is_err());
    }

    #[test]
    fn test_composite_key_aligned_by_position() {
        let db = Database::new(vec![
            TableData::new("child")
                .column("x", "INT")
                .column("y", "INT")
                .foreign_key(["y", "x"], "parent", ["b", "a"])
                .row([Some("1"), Some("2")]),
            TableData::new("parent")
                .column("a", "INT")
                .column("b", "INT")
                .primary_key(["a", "b"])
                .row([Some("1"), Some("2")])
                .row([Some("2"), Some("1")]),
        ])
        .unwrap();

        let child = db.table("child").unwrap();
        let targets = db
            .dereference(child.rows()[0], &child.foreign_keys()[0])
            .unwrap();
        assert_eq!(targets.len(), 1);
        let parent = db.row(targets[0]);
        assert_eq!(parent.get("a"), Some("1"));
        assert_eq!(parent.get("b"), Some("2"));
    }

    #[test]
    fn test_lexical_columns_and_delegate() {
        let db = Database::new(vec![
            TableData::new("people")
                .column("id", "INT")
                .column("name", "TEXT")
                .primary_key(["id"])
                .row([Some("1"), Some("Bob")]),
            TableData::new("students")
                .column("id", "INT")
                .column("school", "TEXT")
                .primary_key(["id"])
                .foreign_key(["id"], "people", ["id"]),
        ])
        .unwrap();

        let students = db.table("students").unwrap();
        assert_eq!(students.lexical_columns(), vec!["school"]);
        assert!(students.primary_key_delegate().is_some());
        assert!(db.table("people").unwrap().primary_key_delegate().is_none());
    }
}
