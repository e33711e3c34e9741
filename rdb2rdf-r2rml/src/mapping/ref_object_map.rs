//! R2RML RefObjectMap structures
//!
//! RefObjectMaps define references between TriplesMap definitions,
//! enabling joins across logical tables.
//!
//! A join condition is written as one or more equalities joined by `AND`:
//!
//! ```text
//! {child.DEPTNO} = {parent.DEPTNO} AND {parent.LOC} = {child.LOC}
//! ```
//!
//! Either operand order is accepted. The aliases `child`/`childAlias` and
//! `parent`/`parentAlias` are recognized case-insensitively, and the column
//! may also follow the braces (`{childAlias.}DEPTNO`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::GraphMaps;
use crate::error::{R2rmlError, R2rmlResult};

static CLAUSE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+AND\s+").expect("valid regex"));

static OPERAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{([A-Za-z]+)\.([^{}\s]*)\}([^{}\s]*)$").expect("valid regex")
});

/// Reference to another TriplesMap with join conditions
///
/// For each child row, the object is the subject of the single parent row
/// whose join columns equal the child's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefObjectMap {
    /// Identifier of the parent TriplesMap
    pub parent_triples_map: String,
    /// Join conditions, at least one
    pub join_conditions: Vec<JoinCondition>,
}

impl RefObjectMap {
    /// Create a RefObjectMap from a join condition expression
    pub fn new(parent_triples_map: impl Into<String>, join_condition: &str) -> R2rmlResult<Self> {
        Ok(Self {
            parent_triples_map: parent_triples_map.into(),
            join_conditions: JoinCondition::parse(join_condition)?,
        })
    }

    /// Create a RefObjectMap with already normalized conditions
    pub fn with_conditions(
        parent_triples_map: impl Into<String>,
        conditions: Vec<JoinCondition>,
    ) -> R2rmlResult<Self> {
        if conditions.is_empty() {
            return Err(R2rmlError::InvalidJoinCondition(
                "at least one join condition is required".to_string(),
            ));
        }
        Ok(Self {
            parent_triples_map: parent_triples_map.into(),
            join_conditions: conditions,
        })
    }

    /// Get all child columns used in join conditions
    pub fn child_columns(&self) -> Vec<&str> {
        self.join_conditions
            .iter()
            .map(|jc| jc.child_column.as_str())
            .collect()
    }

    /// Get all parent columns used in join conditions
    pub fn parent_columns(&self) -> Vec<&str> {
        self.join_conditions
            .iter()
            .map(|jc| jc.parent_column.as_str())
            .collect()
    }
}

/// A single join condition
///
/// The child column in the current table must equal the parent column in
/// the parent TriplesMap's logical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCondition {
    /// Column in the current (child) TriplesMap's logical table
    pub child_column: String,
    /// Column in the parent TriplesMap's logical table
    pub parent_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Child,
    Parent,
}

impl JoinCondition {
    /// Create a new join condition
    pub fn new(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            child_column: child.into(),
            parent_column: parent.into(),
        }
    }

    /// Parse a join condition expression into normalized pairs
    pub fn parse(expression: &str) -> R2rmlResult<Vec<JoinCondition>> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(R2rmlError::InvalidJoinCondition(
                "join condition is empty".to_string(),
            ));
        }
        CLAUSE_SEPARATOR_RE
            .split(trimmed)
            .map(|clause| Self::parse_clause(clause, expression))
            .collect()
    }

    fn parse_clause(clause: &str, expression: &str) -> R2rmlResult<JoinCondition> {
        let invalid = |detail: &str| {
            R2rmlError::InvalidJoinCondition(format!("'{expression}': {detail}"))
        };

        let (left, right) = clause
            .split_once('=')
            .ok_or_else(|| invalid("expected '<operand> = <operand>'"))?;
        if right.contains('=') {
            return Err(invalid("more than one '=' in a clause"));
        }

        let left = Self::parse_operand(left.trim()).ok_or_else(|| invalid("malformed operand"))?;
        let right = Self::parse_operand(right.trim()).ok_or_else(|| invalid("malformed operand"))?;

        match (left, right) {
            ((Side::Child, child), (Side::Parent, parent))
            | ((Side::Parent, parent), (Side::Child, child)) => Ok(JoinCondition::new(child, parent)),
            _ => Err(invalid("each clause must compare a child column with a parent column")),
        }
    }

    fn parse_operand(operand: &str) -> Option<(Side, String)> {
        let caps = OPERAND_RE.captures(operand)?;
        let side = match caps[1].to_ascii_lowercase().as_str() {
            "child" | "childalias" => Side::Child,
            "parent" | "parentalias" => Side::Parent,
            _ => return None,
        };
        let column = match (&caps[2], &caps[3]) {
            (inner, "") if !inner.is_empty() => inner,
            ("", outer) if !outer.is_empty() => outer,
            _ => return None,
        };
        Some((side, column.to_string()))
    }
}

/// Predicate of a reference map; always a constant IRI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefPredicateMap {
    pub predicate: String,
}

impl RefPredicateMap {
    pub fn constant(iri: impl Into<String>) -> Self {
        Self {
            predicate: iri.into(),
        }
    }
}

/// A predicate paired with a RefObjectMap, plus its own graph maps
#[derive(Debug, Clone)]
pub struct RefPredicateObjectMap {
    pub predicate_map: RefPredicateMap,
    pub ref_object_map: RefObjectMap,
    pub graphs: GraphMaps,
}

impl RefPredicateObjectMap {
    pub fn new(predicate_map: RefPredicateMap, ref_object_map: RefObjectMap) -> Self {
        Self {
            predicate_map,
            ref_object_map,
            graphs: GraphMaps::new(),
        }
    }

    pub fn with_graphs(mut self, graphs: GraphMaps) -> Self {
        self.graphs = graphs;
        self
    }
}
