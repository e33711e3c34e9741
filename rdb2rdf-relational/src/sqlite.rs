//! SQLite extractor and query runner (feature `sqlite`).

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};

use crate::cursor::{ColumnMeta, ResultSet, RowCursor};
use crate::error::{RelationalError, Result};
use crate::snapshot::{ColumnDef, ForeignKeyDef, KeyRef, TableData};
use crate::source::RelationalSource;
use crate::{Database, SqlType};

/// A read-only SQLite database used as a relational source.
#[derive(Debug)]
pub struct SqliteSource {
    connection: Connection,
}

impl SqliteSource {
    /// Open an existing database file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SqliteSource> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(SqliteSource { connection })
    }

    /// Wrap an already opened connection.
    pub fn from_connection(connection: Connection) -> SqliteSource {
        SqliteSource { connection }
    }

    fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.connection.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn extract_table(&self, name: &str) -> Result<TableData> {
        let quoted = quote_ident(name);

        // cid, name, type, notnull, dflt_value, pk
        let mut stmt = self
            .connection
            .prepare(&format!("PRAGMA table_info({quoted})"))?;
        let info = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    row.get::<_, i64>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let columns: Vec<ColumnDef> = info
            .iter()
            .map(|(column, declared, _)| ColumnDef {
                name: column.clone(),
                sql_type: SqlType::parse(declared),
            })
            .collect();

        let mut pk: Vec<(i64, String)> = info
            .iter()
            .filter(|(_, _, position)| *position > 0)
            .map(|(column, _, position)| (*position, column.clone()))
            .collect();
        pk.sort();
        let primary_key = (!pk.is_empty()).then(|| pk.into_iter().map(|(_, c)| c).collect());

        let unique_keys = self.unique_keys(&quoted)?;
        let foreign_keys = self.foreign_keys(&quoted)?;

        let result = self.query_result(&format!("SELECT * FROM {quoted}"))?;
        let rows = result_rows(result);

        Ok(TableData {
            name: name.to_string(),
            columns,
            primary_key,
            unique_keys,
            foreign_keys,
            rows,
        })
    }

    fn unique_keys(&self, quoted: &str) -> Result<Vec<Vec<String>>> {
        // seq, name, unique, origin, partial
        let mut stmt = self
            .connection
            .prepare(&format!("PRAGMA index_list({quoted})"))?;
        let indexes = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut keys = Vec::new();
        for (index, unique, origin) in indexes {
            if unique != 1 || origin == "pk" {
                continue;
            }
            // seqno, cid, name
            let mut stmt = self
                .connection
                .prepare(&format!("PRAGMA index_info({})", quote_ident(&index)))?;
            let columns = stmt
                .query_map([], |row| row.get::<_, Option<String>>(2))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            // Expression indexes have no column names.
            if let Some(columns) = columns.into_iter().collect::<Option<Vec<_>>>() {
                keys.push(columns);
            }
        }
        Ok(keys)
    }

    fn foreign_keys(&self, quoted: &str) -> Result<Vec<ForeignKeyDef>> {
        // id, seq, table, from, to, on_update, on_delete, match
        let mut stmt = self
            .connection
            .prepare(&format!("PRAGMA foreign_key_list({quoted})"))?;
        let mut parts = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        parts.sort_by_key(|(id, seq, ..)| (*id, *seq));

        let mut keys: Vec<(i64, ForeignKeyDef, bool)> = Vec::new();
        for (id, _, table, from, to) in parts {
            let implicit = to.is_none();
            match keys.last_mut() {
                Some((last, fk, _)) if *last == id => {
                    fk.columns.push(from);
                    fk.references.columns.extend(to);
                }
                _ => keys.push((
                    id,
                    ForeignKeyDef {
                        columns: vec![from],
                        references: KeyRef {
                            table,
                            columns: to.into_iter().collect(),
                        },
                    },
                    implicit,
                )),
            }
        }

        // An omitted referenced column list means the parent's primary key.
        let mut resolved = Vec::with_capacity(keys.len());
        for (_, mut fk, implicit) in keys {
            if implicit {
                let parent = self.extract_primary_key(&fk.references.table)?;
                fk.references.columns = parent;
            }
            resolved.push(fk);
        }
        Ok(resolved)
    }

    fn extract_primary_key(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let mut pk = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(5)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        pk.retain(|(position, _)| *position > 0);
        pk.sort();
        if pk.is_empty() {
            return Err(RelationalError::Schema(format!(
                "foreign key references table '{table}' which has no primary key"
            )));
        }
        Ok(pk.into_iter().map(|(_, c)| c).collect())
    }

    fn query_result(&self, sql: &str) -> Result<ResultSet> {
        let mut stmt = self.connection.prepare(sql)?;
        let columns: Vec<ColumnMeta> = stmt
            .columns()
            .iter()
            .map(|c| ColumnMeta {
                name: c.name().to_string(),
                sql_type: SqlType::parse(c.decl_type().unwrap_or("")),
            })
            .collect();
        let width = columns.len();

        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(width);
            for index in 0..width {
                record.push(text_value(row.get::<_, Value>(index)?));
            }
            values.push(record);
        }
        ResultSet::new(columns, values)
    }
}

impl RelationalSource for SqliteSource {
    fn extract(&self) -> Result<Database> {
        let mut tables = Vec::new();
        for name in self.table_names()? {
            tracing::debug!(table = %name, "Extracting SQLite table");
            tables.push(self.extract_table(&name)?);
        }
        Database::new(tables)
    }

    fn run_query(&self, sql: &str) -> Result<RowCursor> {
        Ok(self.query_result(sql)?.into_cursor())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn text_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(bytes) => Some(bytes.iter().map(|b| format!("{b:02x}")).collect()),
    }
}

fn result_rows(result: ResultSet) -> Vec<Vec<Option<String>>> {
    let mut cursor = result.into_cursor();
    let names: Vec<String> = cursor.columns().iter().map(|c| c.name.clone()).collect();
    let mut rows = Vec::with_capacity(cursor.len());
    while cursor.advance() {
        rows.push(
            names
                .iter()
                .map(|n| cursor.get(n).ok().flatten().map(str::to_string))
                .collect(),
        );
    }
    rows
}
