//! R2RML term map structures
//!
//! Term maps define how RDF terms are generated from logical table rows.
//! Every constructor validates its input, so a term map that exists is
//! well-formed.

use super::Template;
use crate::error::{R2rmlError, R2rmlResult};
use crate::vocab::R2RML;

/// R2RML term type
///
/// Specifies whether a term map generates IRIs, blank nodes, or literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TermType {
    /// Generate an IRI (default for subject and predicate maps)
    #[default]
    Iri,
    /// Generate a blank node
    BlankNode,
    /// Generate a literal (default for object maps)
    Literal,
}

impl TermType {
    /// Parse a term type from its R2RML IRI or its local name
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            R2RML::IRI | "rr:IRI" | "IRI" => Some(TermType::Iri),
            R2RML::BLANK_NODE | "rr:BlankNode" | "BlankNode" => Some(TermType::BlankNode),
            R2RML::LITERAL | "rr:Literal" | "Literal" => Some(TermType::Literal),
            _ => None,
        }
    }

    /// Check if this term type produces IRIs
    pub fn is_iri(&self) -> bool {
        matches!(self, TermType::Iri)
    }

    /// Check if this term type produces literals
    pub fn is_literal(&self) -> bool {
        matches!(self, TermType::Literal)
    }
}

/// Where a term map takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermSource {
    /// `rr:constant`
    Constant(String),
    /// `rr:column`
    Column(String),
    /// `rr:template`
    Template(Template),
}

impl TermSource {
    /// Build a source from the three optional value properties
    ///
    /// Exactly one of them must be present. `property` names the owning
    /// map in error messages.
    pub fn from_parts(
        property: &str,
        constant: Option<String>,
        column: Option<String>,
        template: Option<String>,
    ) -> R2rmlResult<Self> {
        match (constant, column, template) {
            (Some(value), None, None) => Ok(TermSource::Constant(value)),
            (None, Some(name), None) => Ok(TermSource::Column(name)),
            (None, None, Some(text)) => Ok(TermSource::Template(Template::parse(text)?)),
            (constant, column, template) => Err(R2rmlError::AmbiguousValueSource {
                property: property.to_string(),
                found: [constant.is_some(), column.is_some(), template.is_some()]
                    .iter()
                    .filter(|set| **set)
                    .count(),
            }),
        }
    }

    pub fn constant(value: impl Into<String>) -> Self {
        TermSource::Constant(value.into())
    }

    pub fn column(name: impl Into<String>) -> Self {
        TermSource::Column(name.into())
    }

    pub fn template(text: impl Into<String>) -> R2rmlResult<Self> {
        Ok(TermSource::Template(Template::parse(text)?))
    }

    /// Get all columns referenced by this source
    pub fn referenced_columns(&self) -> Vec<&str> {
        match self {
            TermSource::Constant(_) => vec![],
            TermSource::Column(name) => vec![name.as_str()],
            TermSource::Template(t) => t.columns().collect(),
        }
    }

    /// Column name, if this is a column-valued source
    pub fn as_column(&self) -> Option<&str> {
        match self {
            TermSource::Column(name) => Some(name),
            _ => None,
        }
    }
}

/// Graph maps attached to a subject or predicate-object map
///
/// An empty set means "no graph given". Constants equal to
/// `rr:defaultGraph` denote the default graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphMaps {
    /// Constant graph IRIs
    pub constants: Vec<String>,
    /// Columns whose value is a graph IRI
    pub columns: Vec<String>,
    /// Templates expanding to graph IRIs
    pub templates: Vec<Template>,
}

impl GraphMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build graph maps, parsing each template
    pub fn from_parts(
        constants: Vec<String>,
        columns: Vec<String>,
        templates: Vec<String>,
    ) -> R2rmlResult<Self> {
        let templates = templates
            .into_iter()
            .map(Template::parse)
            .collect::<R2rmlResult<Vec<_>>>()?;
        Ok(Self {
            constants,
            columns,
            templates,
        })
    }

    pub fn with_constant(mut self, iri: impl Into<String>) -> Self {
        self.constants.push(iri.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.columns.is_empty() && self.templates.is_empty()
    }
}

/// Subject map
///
/// Defines how subject IRIs (or blank nodes) are generated for each row.
#[derive(Debug, Clone)]
pub struct SubjectMap {
    /// Value source
    pub source: TermSource,
    /// Term type (IRI or BlankNode)
    pub term_type: TermType,
    /// `rr:class` IRIs, one `rdf:type` statement each
    pub classes: Vec<String>,
    /// Graphs the row's statements are placed in
    pub graphs: GraphMaps,
}

impl SubjectMap {
    /// Create a subject map; `rr:Literal` subjects are rejected
    pub fn new(
        source: TermSource,
        term_type: Option<TermType>,
        classes: Vec<String>,
        graphs: GraphMaps,
    ) -> R2rmlResult<Self> {
        let term_type = term_type.unwrap_or(TermType::Iri);
        if term_type.is_literal() {
            return Err(R2rmlError::InvalidValue {
                property: "rr:termType".to_string(),
                message: "a subject map cannot produce literals".to_string(),
            });
        }
        Ok(Self {
            source,
            term_type,
            classes,
            graphs,
        })
    }

    /// Create an IRI subject map from a template with no classes or graphs
    pub fn template(template: impl Into<String>) -> R2rmlResult<Self> {
        Self::new(TermSource::template(template)?, None, vec![], GraphMaps::new())
    }

    pub fn with_class(mut self, class_iri: impl Into<String>) -> Self {
        self.classes.push(class_iri.into());
        self
    }

    pub fn with_graphs(mut self, graphs: GraphMaps) -> Self {
        self.graphs = graphs;
        self
    }
}

/// Predicate map
///
/// Predicates are always IRIs; usually a constant from `rr:predicate`.
#[derive(Debug, Clone)]
pub struct PredicateMap {
    pub source: TermSource,
}

impl PredicateMap {
    pub fn new(source: TermSource) -> Self {
        Self { source }
    }

    /// Create a constant predicate map
    pub fn constant(iri: impl Into<String>) -> Self {
        Self::new(TermSource::constant(iri))
    }
}

/// Object map
#[derive(Debug, Clone)]
pub struct ObjectMap {
    /// Value source
    pub source: TermSource,
    /// Term type (default: Literal)
    pub term_type: TermType,
    /// Optional datatype IRI for typed literals
    pub datatype: Option<String>,
    /// Optional language tag for language-tagged strings
    pub language: Option<String>,
}

impl ObjectMap {
    /// Create an object map
    ///
    /// Datatype and language only apply to literals, and only one of them
    /// may be given.
    pub fn new(
        source: TermSource,
        term_type: Option<TermType>,
        datatype: Option<String>,
        language: Option<String>,
    ) -> R2rmlResult<Self> {
        let term_type = term_type.unwrap_or(TermType::Literal);
        if datatype.is_some() && language.is_some() {
            return Err(R2rmlError::InvalidValue {
                property: "rr:datatype".to_string(),
                message: "an object map cannot set both rr:datatype and rr:language".to_string(),
            });
        }
        if !term_type.is_literal() && (datatype.is_some() || language.is_some()) {
            return Err(R2rmlError::InvalidValue {
                property: "rr:termType".to_string(),
                message: "rr:datatype and rr:language require term type rr:Literal".to_string(),
            });
        }
        Ok(Self {
            source,
            term_type,
            datatype,
            language,
        })
    }

    /// Create a column object map producing literals
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            source: TermSource::column(column),
            term_type: TermType::Literal,
            datatype: None,
            language: None,
        }
    }

    /// Create a constant IRI object map
    pub fn constant_iri(iri: impl Into<String>) -> Self {
        Self {
            source: TermSource::constant(iri),
            term_type: TermType::Iri,
            datatype: None,
            language: None,
        }
    }
}

/// Predicate-object map pair
///
/// Represents a `rr:predicateObjectMap` with its own graph maps.
#[derive(Debug, Clone)]
pub struct PredicateObjectMap {
    pub predicate_map: PredicateMap,
    pub object_map: ObjectMap,
    pub graphs: GraphMaps,
}

impl PredicateObjectMap {
    pub fn new(predicate_map: PredicateMap, object_map: ObjectMap) -> Self {
        Self {
            predicate_map,
            object_map,
            graphs: GraphMaps::new(),
        }
    }

    pub fn with_graphs(mut self, graphs: GraphMaps) -> Self {
        self.graphs = graphs;
        self
    }
}
