//! Error types for ragdoc-vector.

use thiserror::Error;

/// Result type for ragdoc-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying an index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The item and vector sequences passed to `build` differ in length.
    #[error("Length mismatch: {items} items but {vectors} vectors")]
    LengthMismatch {
        /// Number of items supplied.
        items: usize,
        /// Number of vectors supplied.
        vectors: usize,
    },

    /// An index needs at least one entry.
    #[error("Cannot build an index from zero entries")]
    Empty,

    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., empty, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}
