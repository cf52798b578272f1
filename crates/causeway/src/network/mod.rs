//! Semantic network: a typed relation graph and its structural queries.
//!
//! The network is built once from [`Declaration`](crate::domain::Declaration)s
//! and queried read-only afterwards. Internally it uses petgraph's `DiGraph`
//! with edges directed from **dependent to dependency** (source -> target
//! means source depends on / is a subtype of target), plus a node map for
//! O(1) entity lookup and a per-entity index of debug-time samples.
//!
//! Queries live in [`queries`]:
//!
//! - [`RelationGraph::find_dependents`] - entities whose correct operation
//!   depends transitively on a given entity
//! - [`RelationGraph::find_causes`] - entities whose failure can propagate to
//!   a given entity
//! - [`RelationGraph::rank_causes_by_debug_time`] - causes ordered by mean
//!   recorded debug time
//!
//! All traversals use a worklist with a visited set, so cyclic networks are
//! legal inputs and every query terminates.

mod graph;
mod queries;

pub use graph::RelationGraph;
