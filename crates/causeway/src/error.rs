//! Error types for causeway operations.

use crate::domain::Entity;
use thiserror::Error;

/// The error type for causeway operations.
///
/// Queries are total over a built graph and return plain collections; errors
/// only arise while building a graph from declarations.
#[derive(Debug, Error)]
pub enum Error {
    /// A measurement carried a value that cannot be aggregated.
    #[error("invalid sample {value} for entity {entity}: debug time must be finite and non-negative")]
    InvalidSample {
        /// The entity the sample was recorded for.
        entity: Entity,

        /// The offending value.
        value: f64,
    },
}

/// A specialized Result type for causeway operations.
pub type Result<T> = std::result::Result<T, Error>;
