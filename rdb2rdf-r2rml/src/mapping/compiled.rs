//! Compiled R2RML mapping
//!
//! Holds the TriplesMaps of one mapping document in declaration order and
//! checks that every `rr:parentTriplesMap` reference resolves.

use rustc_hash::FxHashMap;

use super::TriplesMap;
use crate::error::{R2rmlError, R2rmlResult};

/// Complete compiled R2RML mapping
#[derive(Debug, Clone, Default)]
pub struct CompiledR2rmlMapping {
    triples_maps: Vec<TriplesMap>,
    by_id: FxHashMap<String, usize>,
}

impl CompiledR2rmlMapping {
    /// Create a mapping from its TriplesMaps
    ///
    /// Fails on duplicate ids and on references to undefined parents.
    pub fn new(triples_maps: Vec<TriplesMap>) -> R2rmlResult<Self> {
        let mut by_id = FxHashMap::default();
        for (idx, tm) in triples_maps.iter().enumerate() {
            if by_id.insert(tm.id.clone(), idx).is_some() {
                return Err(R2rmlError::InvalidValue {
                    property: "rr:TriplesMap".to_string(),
                    message: format!("duplicate TriplesMap id {}", tm.id),
                });
            }
        }

        for tm in &triples_maps {
            for rpom in &tm.ref_predicate_object_maps {
                let parent = &rpom.ref_object_map.parent_triples_map;
                if !by_id.contains_key(parent) {
                    return Err(R2rmlError::UnknownTriplesMap(parent.clone()));
                }
            }
        }

        Ok(Self {
            triples_maps,
            by_id,
        })
    }

    /// Get a TriplesMap by id
    pub fn get(&self, id: &str) -> Option<&TriplesMap> {
        self.by_id.get(id).map(|&idx| &self.triples_maps[idx])
    }

    /// TriplesMaps in declaration order
    pub fn triples_maps(&self) -> &[TriplesMap] {
        &self.triples_maps
    }

    pub fn len(&self) -> usize {
        self.triples_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples_maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{
        LogicalTable, ObjectMap, PredicateMap, PredicateObjectMap, RefObjectMap, RefPredicateMap,
        RefPredicateObjectMap, SubjectMap,
    };

    fn dept_map() -> TriplesMap {
        TriplesMap::new(
            "#Dept",
            LogicalTable::table("DEPT").unwrap(),
            SubjectMap::template("http://ex.org/dept/{ID}").unwrap(),
            vec![PredicateObjectMap::new(
                PredicateMap::constant("http://ex.org/name"),
                ObjectMap::column("NAME"),
            )],
            vec![],
        )
        .unwrap()
    }

    fn emp_map(parent: &str) -> TriplesMap {
        TriplesMap::new(
            "#Emp",
            LogicalTable::table("EMP").unwrap(),
            SubjectMap::template("http://ex.org/emp/{ID}").unwrap(),
            vec![],
            vec![RefPredicateObjectMap::new(
                RefPredicateMap::constant("http://ex.org/dept"),
                RefObjectMap::new(parent, "{child.DEPT} = {parent.ID}").unwrap(),
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let mapping = CompiledR2rmlMapping::new(vec![dept_map(), emp_map("#Dept")]).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("#Emp").map(|tm| tm.id.as_str()), Some("#Emp"));
        assert_eq!(mapping.triples_maps()[0].id, "#Dept");
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = CompiledR2rmlMapping::new(vec![emp_map("#Missing")]).unwrap_err();
        assert!(matches!(err, R2rmlError::UnknownTriplesMap(id) if id == "#Missing"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        assert!(CompiledR2rmlMapping::new(vec![dept_map(), dept_map()]).is_err());
    }
}
