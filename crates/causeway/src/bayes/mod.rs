//! Bayesian dependency graph: parent structure and the Markov blanket query.
//!
//! Only the structural parent/child adjacency is consumed here. The edge
//! attribute attached to each parent link (typically a conditional
//! probability table) is opaque to this crate, and no probability is ever
//! computed.

use crate::domain::Entity;
use std::collections::{HashMap, HashSet};

/// A probabilistic dependency graph mapping each variable to its direct
/// parents.
///
/// `A` is the attribute carried on each parent link (e.g. a CPT); it is
/// stored but never interpreted. The graph is built once and queried
/// read-only; queries on variables absent from the graph return empty
/// results, never errors.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph<A = ()> {
    parents: HashMap<Entity, Vec<(Entity, A)>>,
}

impl<A> DependencyGraph<A> {
    /// An empty dependency graph.
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Build a graph from a variable -> parents mapping.
    pub fn from_parent_map(parents: HashMap<Entity, Vec<(Entity, A)>>) -> Self {
        Self { parents }
    }

    /// Direct parents of a variable, in declaration order.
    ///
    /// Returns an empty slice for a variable with no entry in the graph.
    pub fn parents_of(&self, variable: &Entity) -> &[(Entity, A)] {
        self.parents
            .get(variable)
            .map_or(&[], Vec::as_slice)
    }

    /// Variables that list `variable` as one of their direct parents.
    pub fn children_of(&self, variable: &Entity) -> HashSet<Entity> {
        self.parents
            .iter()
            .filter(|(_, parents)| parents.iter().any(|(parent, _)| parent == variable))
            .map(|(child, _)| child.clone())
            .collect()
    }

    /// All variables with an entry in the graph.
    pub fn variables(&self) -> impl Iterator<Item = &Entity> {
        self.parents.keys()
    }

    /// The Markov blanket of a variable: its parents, its children, and its
    /// children's other parents, excluding the variable itself.
    ///
    /// A variable absent from the graph has an empty blanket.
    pub fn markov_blanket(&self, variable: &Entity) -> HashSet<Entity> {
        let children = self.children_of(variable);

        let mut blanket = children.clone();
        for member in children.iter().chain(std::iter::once(variable)) {
            for (parent, _) in self.parents_of(member) {
                if parent != variable {
                    blanket.insert(parent.clone());
                }
            }
        }

        // A self-loop would otherwise leak the variable in via its children.
        blanket.remove(variable);
        blanket
    }
}

impl<A> FromIterator<(Entity, Vec<(Entity, A)>)> for DependencyGraph<A> {
    /// Later entries for the same variable replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (Entity, Vec<(Entity, A)>)>>(iter: I) -> Self {
        Self {
            parents: iter.into_iter().collect(),
        }
    }
}
