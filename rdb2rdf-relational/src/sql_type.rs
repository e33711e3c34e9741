//! Source SQL column types and their XSD literal datatypes.
//!
//! The type set follows MySQL naming, which is also what most dumps and
//! SQLite declared types look like. Integer widths keep their signedness
//! because it selects a different XSD datatype.

use std::fmt;

use rdb2rdf_vocab::xsd;
use serde::{Deserialize, Serialize};

/// Declared SQL type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SqlType {
    // Character types
    Char,
    Varchar,
    TinyText,
    Text,
    MediumText,
    LongText,

    // Numeric types
    Bit,
    TinyInt { unsigned: bool },
    SmallInt { unsigned: bool },
    MediumInt { unsigned: bool },
    Int { unsigned: bool },
    BigInt { unsigned: bool },
    Float { unsigned: bool },
    Double { unsigned: bool },
    Decimal { unsigned: bool },

    // Temporal types
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,

    // Enumerations
    Enum,
    Set,

    // Byte streams
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,

    /// A declared type outside the table above, kept verbatim
    Unknown(String),
}

impl SqlType {
    /// Parse a declared column type.
    ///
    /// Matching is case-insensitive, ignores length/precision suffixes
    /// (`VARCHAR(20)`, `DECIMAL(10,2)`) and honours a trailing `UNSIGNED`.
    pub fn parse(declared: &str) -> SqlType {
        let upper = declared.trim().to_ascii_uppercase();
        // Drop "(...)" groups, keep the words around them.
        let mut base = String::with_capacity(upper.len());
        let mut depth = 0usize;
        for c in upper.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => base.push(c),
                _ => {}
            }
        }
        let words: Vec<&str> = base.split_whitespace().collect();
        let unsigned = words.contains(&"UNSIGNED");
        let name: Vec<&str> = words
            .iter()
            .copied()
            .filter(|w| !matches!(*w, "UNSIGNED" | "SIGNED" | "ZEROFILL"))
            .collect();

        let name = name.join(" ");
        match name.as_str() {
            "CHAR" | "CHARACTER" | "NCHAR" | "NATIVE CHARACTER" => SqlType::Char,
            "VARCHAR" | "CHARACTER VARYING" | "NVARCHAR" | "VARYING CHARACTER" => SqlType::Varchar,
            "TINYTEXT" => SqlType::TinyText,
            "TEXT" | "CLOB" => SqlType::Text,
            "MEDIUMTEXT" => SqlType::MediumText,
            "LONGTEXT" => SqlType::LongText,
            "BIT" => SqlType::Bit,
            "TINYINT" | "BOOL" | "BOOLEAN" => SqlType::TinyInt { unsigned },
            "SMALLINT" | "INT2" => SqlType::SmallInt { unsigned },
            "MEDIUMINT" => SqlType::MediumInt { unsigned },
            "INT" | "INTEGER" => SqlType::Int { unsigned },
            "BIGINT" | "INT8" | "BIG INT" => SqlType::BigInt { unsigned },
            "FLOAT" => SqlType::Float { unsigned },
            "DOUBLE" | "DOUBLE PRECISION" | "REAL" => SqlType::Double { unsigned },
            "DECIMAL" | "DEC" | "NUMERIC" | "FIXED" => SqlType::Decimal { unsigned },
            "DATE" => SqlType::Date,
            "DATETIME" => SqlType::DateTime,
            "TIMESTAMP" => SqlType::Timestamp,
            "TIME" => SqlType::Time,
            "YEAR" => SqlType::Year,
            "ENUM" => SqlType::Enum,
            "SET" => SqlType::Set,
            "TINYBLOB" => SqlType::TinyBlob,
            "BLOB" => SqlType::Blob,
            "MEDIUMBLOB" => SqlType::MediumBlob,
            "LONGBLOB" => SqlType::LongBlob,
            _ => affinity(&name, unsigned)
                .unwrap_or_else(|| SqlType::Unknown(declared.trim().to_string())),
        }
    }

    /// XSD datatype IRI for literals of this type.
    ///
    /// Returns `None` for byte streams and unknown types: there is no
    /// mapping, which callers decide how to treat.
    pub fn xsd_datatype(&self) -> Option<&'static str> {
        let iri = match self {
            SqlType::Char
            | SqlType::Varchar
            | SqlType::TinyText
            | SqlType::Text
            | SqlType::MediumText
            | SqlType::LongText => xsd::STRING,
            SqlType::Bit => xsd::BYTE,
            SqlType::TinyInt { unsigned: false } => xsd::BYTE,
            SqlType::TinyInt { unsigned: true } => xsd::UNSIGNED_BYTE,
            SqlType::SmallInt { unsigned: false } => xsd::SHORT,
            SqlType::SmallInt { unsigned: true } => xsd::UNSIGNED_SHORT,
            SqlType::MediumInt { .. } => xsd::INT,
            SqlType::Int { unsigned: false } => xsd::INT,
            SqlType::Int { unsigned: true } => xsd::UNSIGNED_INT,
            SqlType::BigInt { unsigned: false } => xsd::LONG,
            SqlType::BigInt { unsigned: true } => xsd::UNSIGNED_LONG,
            SqlType::Float { .. } => xsd::FLOAT,
            SqlType::Double { .. } => xsd::DOUBLE,
            SqlType::Decimal { .. } => xsd::DECIMAL,
            SqlType::Date => xsd::DATE,
            SqlType::DateTime | SqlType::Timestamp => xsd::DATE_TIME,
            SqlType::Time => xsd::TIME,
            SqlType::Year => xsd::G_YEAR,
            SqlType::Enum | SqlType::Set => xsd::ENUMERATION,
            SqlType::TinyBlob
            | SqlType::Blob
            | SqlType::MediumBlob
            | SqlType::LongBlob
            | SqlType::Unknown(_) => return None,
        };
        Some(iri)
    }

    /// Byte-stream types have no literal representation.
    pub fn is_blob(&self) -> bool {
        matches!(
            self,
            SqlType::TinyBlob | SqlType::Blob | SqlType::MediumBlob | SqlType::LongBlob
        )
    }

    /// Character types produce plain (untyped) literals.
    pub fn is_string(&self) -> bool {
        self.xsd_datatype().is_some_and(xsd::is_string)
    }
}

/// Spatial type names, which would otherwise hit the `INT` rule below.
const SPATIAL: &[&str] = &[
    "GEOMETRY",
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

/// SQLite column affinity for declared types outside the named table.
///
/// Rules are applied in SQLite's order; a typeless column has BLOB affinity.
/// NUMERIC affinity has no single datatype and stays unknown.
fn affinity(name: &str, unsigned: bool) -> Option<SqlType> {
    if name.is_empty() {
        return Some(SqlType::Blob);
    }
    if SPATIAL.contains(&name) {
        return None;
    }
    if name.contains("INT") {
        Some(SqlType::Int { unsigned })
    } else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| name.contains(t)) {
        Some(SqlType::Text)
    } else if name.contains("BLOB") {
        Some(SqlType::Blob)
    } else if ["REAL", "FLOA", "DOUB"].iter().any(|t| name.contains(t)) {
        Some(SqlType::Double { unsigned })
    } else {
        None
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, unsigned) = match self {
            SqlType::Char => ("CHAR", false),
            SqlType::Varchar => ("VARCHAR", false),
            SqlType::TinyText => ("TINYTEXT", false),
            SqlType::Text => ("TEXT", false),
            SqlType::MediumText => ("MEDIUMTEXT", false),
            SqlType::LongText => ("LONGTEXT", false),
            SqlType::Bit => ("BIT", false),
            SqlType::TinyInt { unsigned } => ("TINYINT", *unsigned),
            SqlType::SmallInt { unsigned } => ("SMALLINT", *unsigned),
            SqlType::MediumInt { unsigned } => ("MEDIUMINT", *unsigned),
            SqlType::Int { unsigned } => ("INT", *unsigned),
            SqlType::BigInt { unsigned } => ("BIGINT", *unsigned),
            SqlType::Float { unsigned } => ("FLOAT", *unsigned),
            SqlType::Double { unsigned } => ("DOUBLE", *unsigned),
            SqlType::Decimal { unsigned } => ("DECIMAL", *unsigned),
            SqlType::Date => ("DATE", false),
            SqlType::DateTime => ("DATETIME", false),
            SqlType::Timestamp => ("TIMESTAMP", false),
            SqlType::Time => ("TIME", false),
            SqlType::Year => ("YEAR", false),
            SqlType::Enum => ("ENUM", false),
            SqlType::Set => ("SET", false),
            SqlType::TinyBlob => ("TINYBLOB", false),
            SqlType::Blob => ("BLOB", false),
            SqlType::MediumBlob => ("MEDIUMBLOB", false),
            SqlType::LongBlob => ("LONGBLOB", false),
            SqlType::Unknown(name) => return f.write_str(name),
        };
        if unsigned {
            write!(f, "{name} UNSIGNED")
        } else {
            f.write_str(name)
        }
    }
}

impl From<String> for SqlType {
    fn from(declared: String) -> Self {
        SqlType::parse(&declared)
    }
}

impl From<&str> for SqlType {
    fn from(declared: &str) -> Self {
        SqlType::parse(declared)
    }
}

impl From<SqlType> for String {
    fn from(sql_type: SqlType) -> Self {
        sql_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_suffixes() {
        assert_eq!(SqlType::parse("varchar(20)"), SqlType::Varchar);
        assert_eq!(
            SqlType::parse("DECIMAL(10,2) UNSIGNED"),
            SqlType::Decimal { unsigned: true }
        );
        assert_eq!(
            SqlType::parse("int(11) unsigned zerofill"),
            SqlType::Int { unsigned: true }
        );
        assert_eq!(SqlType::parse("INTEGER"), SqlType::Int { unsigned: false });
        assert_eq!(
            SqlType::parse("GEOMETRY"),
            SqlType::Unknown("GEOMETRY".to_string())
        );
    }

    #[test]
    fn test_signedness_selects_datatype() {
        let cases = [
            ("TINYINT", xsd::BYTE),
            ("TINYINT UNSIGNED", xsd::UNSIGNED_BYTE),
            ("SMALLINT", xsd::SHORT),
            ("SMALLINT UNSIGNED", xsd::UNSIGNED_SHORT),
            ("MEDIUMINT UNSIGNED", xsd::INT),
            ("INT", xsd::INT),
            ("INT UNSIGNED", xsd::UNSIGNED_INT),
            ("BIGINT", xsd::LONG),
            ("BIGINT UNSIGNED", xsd::UNSIGNED_LONG),
            ("FLOAT UNSIGNED", xsd::FLOAT),
            ("DOUBLE", xsd::DOUBLE),
        ];
        for (declared, expected) in cases {
            assert_eq!(
                SqlType::parse(declared).xsd_datatype(),
                Some(expected),
                "{declared}"
            );
        }
    }

    #[test]
    fn test_temporal_and_enum_datatypes() {
        assert_eq!(SqlType::Date.xsd_datatype(), Some(xsd::DATE));
        assert_eq!(SqlType::Timestamp.xsd_datatype(), Some(xsd::DATE_TIME));
        assert_eq!(SqlType::DateTime.xsd_datatype(), Some(xsd::DATE_TIME));
        assert_eq!(SqlType::Time.xsd_datatype(), Some(xsd::TIME));
        assert_eq!(SqlType::Year.xsd_datatype(), Some(xsd::G_YEAR));
        assert_eq!(SqlType::Set.xsd_datatype(), Some(xsd::ENUMERATION));
    }

    #[test]
    fn test_blob_and_unknown_have_no_mapping() {
        for blob in ["TINYBLOB", "blob", "MEDIUMBLOB", "LongBlob"] {
            let t = SqlType::parse(blob);
            assert!(t.is_blob(), "{blob}");
            assert_eq!(t.xsd_datatype(), None);
        }
        let unknown = SqlType::parse("POINT");
        assert_eq!(unknown, SqlType::Unknown("POINT".to_string()));
        assert!(!unknown.is_blob());
        assert_eq!(unknown.xsd_datatype(), None);
    }

    #[test]
    fn test_sqlite_declared_types() {
        let cases = [
            ("INT2", SqlType::SmallInt { unsigned: false }),
            ("INT8", SqlType::BigInt { unsigned: false }),
            ("UNSIGNED BIG INT", SqlType::BigInt { unsigned: true }),
            ("NATIVE CHARACTER(70)", SqlType::Char),
            ("VARYING CHARACTER(255)", SqlType::Varchar),
            ("", SqlType::Blob),
            ("  ", SqlType::Blob),
        ];
        for (declared, expected) in cases {
            assert_eq!(SqlType::parse(declared), expected, "{declared:?}");
        }
    }

    #[test]
    fn test_sqlite_affinity_fallback() {
        assert_eq!(SqlType::parse("SERIAL INTEGER"), SqlType::Int { unsigned: false });
        assert_eq!(SqlType::parse("STRINGCHAR(12)"), SqlType::Text);
        assert_eq!(SqlType::parse("NCLOB"), SqlType::Text);
        assert_eq!(SqlType::parse("binary blob"), SqlType::Blob);
        assert_eq!(SqlType::parse("FLOAT8"), SqlType::Double { unsigned: false });
        assert_eq!(SqlType::parse("DOUB"), SqlType::Double { unsigned: false });
        assert_eq!(
            SqlType::parse("MULTIPOINT"),
            SqlType::Unknown("MULTIPOINT".to_string())
        );

        assert_eq!(SqlType::parse("INT8").xsd_datatype(), Some(xsd::LONG));
        assert_eq!(SqlType::parse("STRINGCHAR").xsd_datatype(), Some(xsd::STRING));
        assert!(SqlType::parse("").is_blob());
    }

    #[test]
    fn test_string_types() {
        assert!(SqlType::parse("longtext").is_string());
        assert!(SqlType::Char.is_string());
        assert!(!SqlType::Int { unsigned: false }.is_string());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let t = SqlType::BigInt { unsigned: true };
        assert_eq!(t.to_string(), "BIGINT UNSIGNED");
        assert_eq!(SqlType::parse(&t.to_string()), t);
    }
}
