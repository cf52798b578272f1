//! Structural queries over the semantic network.
//!
//! All three queries are read-only worklist traversals over structural
//! (`Subtype`/`Depends`) edges. A visited set guarantees termination on
//! cyclic networks: an entity is expanded at most once per query, but still
//! appears in the result whenever an edge justifies it.

use super::RelationGraph;
use crate::domain::{Entity, RelationKind};
use petgraph::Direction;
use std::collections::{HashSet, VecDeque};

impl RelationGraph {
    /// Every entity whose correct operation depends, directly or
    /// transitively, on `entity`.
    ///
    /// Walks incoming structural edges. For a `Depends` edge the dependent
    /// side joins the result - replaced by its direct subtypes when it has
    /// any, since a dependency declared on a supertype stands in for each of
    /// its subtypes. A `Subtype` edge contributes nothing directly; both
    /// kinds are expanded further.
    ///
    /// Returns the empty set for an unknown entity. The query entity itself
    /// appears only when a structural cycle leads back to it.
    pub fn find_dependents(&self, entity: &Entity) -> HashSet<Entity> {
        tracing::trace!(%entity, "find_dependents");
        let mut dependents = HashSet::new();
        let Some(start) = self.node(entity) else {
            return dependents;
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for (dependent, kind) in self.structural_edges(node, Direction::Incoming) {
                if kind == RelationKind::Depends {
                    let subtypes = self.subtype_sources(dependent);
                    if subtypes.is_empty() {
                        dependents.insert(self.entity_at(dependent).clone());
                    } else {
                        dependents
                            .extend(subtypes.into_iter().map(|s| self.entity_at(s).clone()));
                    }
                }
                if visited.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        dependents
    }

    /// Every entity whose failure or malfunction can propagate to cause
    /// failure in `entity`.
    ///
    /// Walks outgoing structural edges. The target of a `Depends` edge is a
    /// cause; a `Subtype` edge is not a cause by itself and contributes only
    /// through further expansion. Returns the empty set for an unknown
    /// entity, or for a network reachable only over `Subtype` edges.
    pub fn find_causes(&self, entity: &Entity) -> HashSet<Entity> {
        tracing::trace!(%entity, "find_causes");
        let mut causes = HashSet::new();
        let Some(start) = self.node(entity) else {
            return causes;
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for (dependency, kind) in self.structural_edges(node, Direction::Outgoing) {
                if kind == RelationKind::Depends {
                    causes.insert(self.entity_at(dependency).clone());
                }
                if visited.insert(dependency) {
                    queue.push_back(dependency);
                }
            }
        }

        causes
    }

    /// Causes of `entity` ranked by mean recorded debug time, ascending.
    ///
    /// Causes with no recorded samples are skipped: ranking is a
    /// prioritization aid and an unmeasured cause cannot be placed. Ties on
    /// the mean are broken by entity order, so the output is deterministic.
    pub fn rank_causes_by_debug_time(&self, entity: &Entity) -> Vec<(Entity, f64)> {
        let mut ranked: Vec<(Entity, f64)> = self
            .find_causes(entity)
            .into_iter()
            .filter_map(|cause| {
                let samples = self.debug_times(&cause);
                if samples.is_empty() {
                    tracing::debug!(%cause, "no debug-time samples recorded, skipping");
                    return None;
                }
                let mean = samples.iter().sum::<f64>() / samples.len() as f64;
                Some((cause, mean))
            })
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}
