//! Serde shapes of the JSON mapping document
//!
//! These mirror the document one-to-one and carry no validation; the
//! extractor turns them into checked mapping structures.

use serde::Deserialize;

/// Top-level mapping document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDocument {
    pub triples_maps: Vec<TriplesMapDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriplesMapDoc {
    pub id: String,
    pub logical_table: LogicalTableDoc,
    pub subject_map: Option<SubjectMapDoc>,
    #[serde(default)]
    pub predicate_object_maps: Vec<PredicateObjectMapDoc>,
    #[serde(default)]
    pub ref_predicate_object_maps: Vec<RefPredicateObjectMapDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalTableDoc {
    pub table_name: Option<String>,
    pub sql_query: Option<String>,
}

/// `constant` / `column` / `template` of any term map
#[derive(Debug, Default, Deserialize)]
pub struct ValueDoc {
    pub constant: Option<String>,
    pub column: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphsDoc {
    #[serde(default)]
    pub graphs: Vec<String>,
    #[serde(default)]
    pub graph_columns: Vec<String>,
    #[serde(default)]
    pub graph_templates: Vec<String>,
}

/// A single string or a list of strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMapDoc {
    #[serde(flatten)]
    pub value: ValueDoc,
    pub term_type: Option<String>,
    #[serde(default)]
    pub class: OneOrMany,
    #[serde(flatten)]
    pub graphs: GraphsDoc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicateObjectMapDoc {
    /// Shorthand for a constant predicate map
    pub predicate: Option<String>,
    pub predicate_map: Option<ValueDoc>,
    pub object_map: ObjectMapDoc,
    #[serde(flatten)]
    pub graphs: GraphsDoc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMapDoc {
    #[serde(flatten)]
    pub value: ValueDoc,
    pub term_type: Option<String>,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefPredicateObjectMapDoc {
    pub predicate: String,
    pub object_map: RefObjectMapDoc,
    #[serde(flatten)]
    pub graphs: GraphsDoc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefObjectMapDoc {
    pub parent_triples_map: String,
    pub join_condition: String,
}
