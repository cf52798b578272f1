//! Domain types shared by the semantic network and the dependency graph.
//!
//! Relations and measurements are plain values: two facts with identical
//! fields are the same fact for deduplication purposes. Nothing here enforces
//! acyclicity - a network may legally contain `Subtype`/`Depends` cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node in the semantic network, or a variable in
/// the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity(pub String);

impl Entity {
    /// Create a new entity.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The entity name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of a directed relation between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Taxonomic link - the source is a subtype of the target.
    Subtype,

    /// Operational link - the source depends on the target.
    Depends,

    /// Any other relation kind. Stored, but never part of
    /// dependency/failure propagation.
    Other(String),
}

impl RelationKind {
    /// Whether this kind participates in dependency and failure propagation.
    pub fn is_structural(&self) -> bool {
        matches!(self, RelationKind::Subtype | RelationKind::Depends)
    }
}

/// Directed, typed edge between two entities.
///
/// Edge direction follows the dependent -> dependency convention:
/// for `Depends` the source depends on the target, for `Subtype` the source
/// is a subtype of the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Origin of the edge (the dependent / the subtype).
    pub source: Entity,

    /// Destination of the edge (the dependency / the supertype).
    pub target: Entity,

    /// Kind of the relation.
    pub kind: RelationKind,
}

impl Relation {
    /// A `Subtype` relation: `source` is a subtype of `target`.
    pub fn subtype(source: impl Into<Entity>, target: impl Into<Entity>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Subtype,
        }
    }

    /// A `Depends` relation: `source` depends on `target`.
    pub fn depends(source: impl Into<Entity>, target: impl Into<Entity>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Depends,
        }
    }

    /// A relation of any other kind.
    pub fn other(
        kind: impl Into<String>,
        source: impl Into<Entity>,
        target: impl Into<Entity>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Other(kind.into()),
        }
    }
}

/// Kind of a numeric measurement attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Time spent analyzing/debugging the entity, in arbitrary units.
    DebugTime,
}

/// A numeric sample recorded against an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// The entity the sample was recorded for.
    pub entity: Entity,

    /// What was measured.
    pub metric: Metric,

    /// The recorded value. Must be finite and non-negative.
    pub value: f64,
}

impl Measurement {
    /// A debug-time sample for an entity.
    pub fn debug_time(entity: impl Into<Entity>, value: f64) -> Self {
        Self {
            entity: entity.into(),
            metric: Metric::DebugTime,
            value,
        }
    }
}

/// A stored fact in the semantic network.
///
/// Duplicate declarations are legal; queries deduplicate by relation
/// identity where the semantics call for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    /// A typed edge between two entities.
    Relation(Relation),

    /// A numeric sample attached to a single entity.
    Measurement(Measurement),
}

impl From<Relation> for Declaration {
    fn from(relation: Relation) -> Self {
        Self::Relation(relation)
    }
}

impl From<Measurement> for Declaration {
    fn from(measurement: Measurement) -> Self {
        Self::Measurement(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_value_equality() {
        let a = Relation::depends("A", "B");
        let b = Relation::depends("A", "B");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn other_kinds_are_not_structural() {
        assert!(RelationKind::Subtype.is_structural());
        assert!(RelationKind::Depends.is_structural());
        assert!(!RelationKind::Other("member".to_string()).is_structural());
    }

    #[test]
    fn entity_ordering_is_lexical() {
        let mut entities = vec![Entity::new("C"), Entity::new("A"), Entity::new("B")];
        entities.sort();
        assert_eq!(
            entities,
            vec![Entity::new("A"), Entity::new("B"), Entity::new("C")]
        );
    }

    #[test]
    fn declaration_serde_roundtrip() {
        let decls = vec![
            Declaration::from(Relation::subtype("Dog", "Animal")),
            Declaration::from(Measurement::debug_time("Dog", 2.5)),
        ];
        let json = serde_json::to_string(&decls).unwrap();
        let back: Vec<Declaration> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decls);
    }

    #[test]
    fn relation_kind_serializes_snake_case() {
        let json = serde_json::to_string(&RelationKind::Subtype).unwrap();
        assert_eq!(json, "\"subtype\"");
        let json = serde_json::to_string(&Metric::DebugTime).unwrap();
        assert_eq!(json, "\"debug_time\"");
    }
}
