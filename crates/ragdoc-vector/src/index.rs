//! Exact nearest-neighbor index.
//!
//! A [`VectorIndex`] is built once from parallel sequences of items and their
//! embedding vectors and is read-only afterwards. Search is a full scan under
//! the configured [`DistanceMetric`], which keeps results deterministic: ties
//! are broken by insertion order.

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use tracing::debug;

/// A single search result borrowed from the index.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a, T> {
    /// The stored item.
    pub item: &'a T,
    /// Similarity score (higher is more similar).
    pub score: f32,
    /// Insertion position of the item in the index.
    pub position: usize,
}

struct Entry<T> {
    item: T,
    vector: Vec<f32>,
}

/// Immutable in-memory vector index.
pub struct VectorIndex<T> {
    entries: Vec<Entry<T>>,
    dimensions: usize,
    metric: DistanceMetric,
}

impl<T> VectorIndex<T> {
    /// Build a new index from items and their vectors.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if `items` and `vectors` differ in length.
    /// - [`Error::Empty`] if there is nothing to index.
    /// - [`Error::DimensionMismatch`] if vectors disagree on dimensionality.
    /// - [`Error::InvalidVector`] if a vector is empty or holds non-finite values.
    pub fn build(items: Vec<T>, vectors: Vec<Vec<f32>>, metric: DistanceMetric) -> Result<Self> {
        if items.len() != vectors.len() {
            return Err(Error::LengthMismatch {
                items: items.len(),
                vectors: vectors.len(),
            });
        }

        let dimensions = match vectors.first() {
            Some(v) => v.len(),
            None => return Err(Error::Empty),
        };

        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            validate_vector(vector).map_err(|reason| {
                Error::InvalidVector(format!("entry {}: {}", position, reason))
            })?;
        }

        let entries = items
            .into_iter()
            .zip(vectors)
            .map(|(item, vector)| Entry { item, vector })
            .collect::<Vec<_>>();

        debug!(entries = entries.len(), dimensions, %metric, "Built vector index");

        Ok(Self {
            entries,
            dimensions,
            metric,
        })
    }

    /// Return up to `k` items nearest to `query`, best-first.
    ///
    /// Returns all items when the index holds fewer than `k`.
    ///
    /// # Errors
    ///
    /// Fails if `query` has the wrong dimensionality or is not a finite vector.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit<'_, T>>> {
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }
        validate_vector(query).map_err(|reason| Error::InvalidVector(format!("query: {}", reason)))?;

        if k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit<'_, T>> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| SearchHit {
                item: &entry.item,
                score: self.metric.similarity(query, &entry.vector),
                position,
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);

        Ok(hits)
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no items. Always false for a built index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality shared by every vector in the index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Metric used to score queries.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Iterate over stored items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }
}

fn validate_vector(vector: &[f32]) -> std::result::Result<(), &'static str> {
    if vector.is_empty() {
        return Err("vector is empty");
    }
    if vector.iter().any(|x| !x.is_finite()) {
        return Err("vector contains NaN or infinite values");
    }
    Ok(())
}
