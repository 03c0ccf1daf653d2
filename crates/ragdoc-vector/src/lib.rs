//! # ragdoc-vector
//!
//! An in-memory, exact nearest-neighbor index for document chunk embeddings.
//!
//! An index is built once from parallel sequences of items and vectors and is
//! immutable afterwards. Replacing the index a service queries is the owner's
//! job; this crate never mutates an index in place.
//!
//! ## Quick Start
//!
//! ```rust
//! use ragdoc_vector::{DistanceMetric, VectorIndex};
//!
//! let index = VectorIndex::build(
//!     vec!["intro", "pricing"],
//!     vec![vec![1.0, 0.0], vec![0.0, 1.0]],
//!     DistanceMetric::Cosine,
//! )?;
//!
//! let hits = index.search(&[0.9, 0.1], 4)?;
//! assert_eq!(*hits[0].item, "intro");
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), ragdoc_vector::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;

pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use index::{SearchHit, VectorIndex};
