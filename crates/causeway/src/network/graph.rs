//! Indexed storage for the semantic network.

use crate::domain::{Declaration, Entity, Metric, Relation, RelationKind};
use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A typed relation graph built from declarations.
///
/// The graph is immutable after construction. Duplicate declarations produce
/// parallel edges; queries deduplicate by relation identity where the
/// semantics require it.
///
/// # Graph Representation
///
/// - Nodes hold [`Entity`] values, edges hold the [`RelationKind`].
/// - Edge direction: source (dependent/subtype) -> target (dependency/supertype).
/// - Debug-time samples are kept in a side index rather than as edges, since
///   their second slot is a number, not an entity.
pub struct RelationGraph {
    /// Relation edges, including non-structural (`Other`) kinds.
    graph: DiGraph<Entity, RelationKind>,

    /// Mapping from entity to graph node for O(1) lookups.
    node_map: HashMap<Entity, NodeIndex>,

    /// Recorded debug-time samples per entity.
    debug_times: HashMap<Entity, Vec<f64>>,
}

impl RelationGraph {
    /// Build a graph from a sequence of declarations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSample`] if a measurement carries a
    /// non-finite or negative value.
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = Declaration>,
    ) -> Result<Self> {
        let mut network = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            debug_times: HashMap::new(),
        };

        for declaration in declarations {
            match declaration {
                Declaration::Relation(relation) => {
                    let source = network.ensure_node(relation.source);
                    let target = network.ensure_node(relation.target);
                    network.graph.add_edge(source, target, relation.kind);
                }
                Declaration::Measurement(measurement) => {
                    if !measurement.value.is_finite() || measurement.value < 0.0 {
                        return Err(Error::InvalidSample {
                            entity: measurement.entity,
                            value: measurement.value,
                        });
                    }
                    match measurement.metric {
                        Metric::DebugTime => network
                            .debug_times
                            .entry(measurement.entity)
                            .or_default()
                            .push(measurement.value),
                    }
                }
            }
        }

        Ok(network)
    }

    /// Whether the entity appears in any relation.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.node_map.contains_key(entity)
    }

    /// All entities that appear in at least one relation.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.node_map.keys()
    }

    /// All relations whose source is `entity`.
    pub fn relations_from(&self, entity: &Entity) -> Vec<Relation> {
        self.relations_directed(entity, Direction::Outgoing)
    }

    /// All relations whose target is `entity`.
    pub fn relations_to(&self, entity: &Entity) -> Vec<Relation> {
        self.relations_directed(entity, Direction::Incoming)
    }

    /// Direct subtypes of an entity: sources of `Subtype` edges whose target
    /// is `entity`.
    pub fn subtypes_of(&self, entity: &Entity) -> HashSet<Entity> {
        let Some(&node) = self.node_map.get(entity) else {
            return HashSet::new();
        };
        self.subtype_sources(node)
            .into_iter()
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Debug-time samples recorded for an entity. Empty if none were declared.
    pub fn debug_times(&self, entity: &Entity) -> &[f64] {
        self.debug_times
            .get(entity)
            .map_or(&[], Vec::as_slice)
    }

    /// Graph node for an entity, if the entity is known.
    pub(super) fn node(&self, entity: &Entity) -> Option<NodeIndex> {
        self.node_map.get(entity).copied()
    }

    /// The entity stored at a graph node.
    pub(super) fn entity_at(&self, node: NodeIndex) -> &Entity {
        &self.graph[node]
    }

    /// Structural (`Subtype`/`Depends`) edges touching `node` in the given
    /// direction, deduplicated by relation identity. Each item is the node at
    /// the far end plus the edge kind.
    pub(super) fn structural_edges(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> Vec<(NodeIndex, RelationKind)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for edge in self.graph.edges_directed(node, direction) {
            if !edge.weight().is_structural() {
                continue;
            }
            let neighbor = match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            };
            if seen.insert((neighbor, edge.weight().clone())) {
                edges.push((neighbor, edge.weight().clone()));
            }
        }
        edges
    }

    /// Nodes holding direct subtypes of the entity at `node`.
    pub(super) fn subtype_sources(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter(|edge| *edge.weight() == RelationKind::Subtype)
            .map(|edge| edge.source())
            .filter(|source| seen.insert(*source))
            .collect()
    }

    fn ensure_node(&mut self, entity: Entity) -> NodeIndex {
        if let Some(&node) = self.node_map.get(&entity) {
            return node;
        }
        let node = self.graph.add_node(entity.clone());
        self.node_map.insert(entity, node);
        node
    }

    fn relations_directed(&self, entity: &Entity, direction: Direction) -> Vec<Relation> {
        let Some(&node) = self.node_map.get(entity) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(node, direction)
            .map(|edge| Relation {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                kind: edge.weight().clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Measurement;

    fn network(declarations: Vec<Declaration>) -> RelationGraph {
        RelationGraph::from_declarations(declarations).unwrap()
    }

    #[test]
    fn builds_nodes_and_edges_from_declarations() {
        let net = network(vec![
            Relation::subtype("Dog", "Animal").into(),
            Relation::depends("Animal", "PowerGrid").into(),
        ]);

        assert!(net.contains(&"Dog".into()));
        assert!(net.contains(&"PowerGrid".into()));
        assert!(!net.contains(&"Cat".into()));
        assert_eq!(net.entities().count(), 3);
    }

    #[test]
    fn typed_lookups_filter_by_direction() {
        let net = network(vec![
            Relation::depends("A", "B").into(),
            Relation::depends("B", "C").into(),
        ]);

        let from_b = net.relations_from(&"B".into());
        assert_eq!(from_b, vec![Relation::depends("B", "C")]);

        let to_b = net.relations_to(&"B".into());
        assert_eq!(to_b, vec![Relation::depends("A", "B")]);
    }

    #[test]
    fn subtypes_of_returns_direct_subtypes_only() {
        let net = network(vec![
            Relation::subtype("Dog", "Animal").into(),
            Relation::subtype("Cat", "Animal").into(),
            Relation::subtype("Puppy", "Dog").into(),
        ]);

        let subtypes = net.subtypes_of(&"Animal".into());
        assert_eq!(subtypes, HashSet::from([Entity::new("Dog"), Entity::new("Cat")]));
    }

    #[test]
    fn other_relation_kinds_are_stored_but_not_structural() {
        let net = network(vec![Relation::other("member", "Wheel", "Car").into()]);

        assert!(net.contains(&"Wheel".into()));
        let node = net.node(&"Car".into()).unwrap();
        assert!(net.structural_edges(node, Direction::Incoming).is_empty());
    }

    #[test]
    fn duplicate_declarations_dedupe_by_relation_identity() {
        let net = network(vec![
            Relation::depends("A", "B").into(),
            Relation::depends("A", "B").into(),
        ]);

        let node = net.node(&"B".into()).unwrap();
        assert_eq!(net.structural_edges(node, Direction::Incoming).len(), 1);
    }

    #[test]
    fn measurements_index_by_entity() {
        let net = network(vec![
            Measurement::debug_time("X", 4.0).into(),
            Measurement::debug_time("X", 6.0).into(),
        ]);

        assert_eq!(net.debug_times(&"X".into()), &[4.0, 6.0]);
        assert!(net.debug_times(&"Y".into()).is_empty());
    }

    #[test]
    fn rejects_non_finite_sample() {
        let result =
            RelationGraph::from_declarations(vec![Measurement::debug_time("X", f64::NAN).into()]);
        assert!(matches!(result, Err(Error::InvalidSample { .. })));
    }

    #[test]
    fn rejects_negative_sample() {
        let result =
            RelationGraph::from_declarations(vec![Measurement::debug_time("X", -1.0).into()]);
        assert!(matches!(
            result,
            Err(Error::InvalidSample { value, .. }) if value == -1.0
        ));
    }
}
