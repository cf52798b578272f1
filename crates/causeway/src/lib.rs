//! Causeway - structural queries over declarative knowledge models.
//!
//! This crate answers structural questions over two small, independently
//! built graph models:
//!
//! - A **semantic network** ([`network::RelationGraph`]) of typed, directed
//!   relations between entities. Queries compute which entities transitively
//!   depend on a given entity, which entities can cause failures in it, and a
//!   debug-time-weighted ranking of those causes.
//! - A **Bayesian dependency graph** ([`bayes::DependencyGraph`]) mapping
//!   each variable to its direct probabilistic parents. The only query is the
//!   Markov blanket of a variable; no probability computation happens here.
//!
//! Both graphs are populated once and queried read-only. All queries take
//! `&self`, so concurrent queries against the same snapshot need no
//! coordination.

#![forbid(unsafe_code)]

pub mod bayes;
pub mod domain;
pub mod error;
pub mod network;
