//! Distance metrics for vector similarity.

use std::fmt;

/// Distance metric used to rank chunks against a query vector.
///
/// Every metric is exposed as a similarity score where **higher is more
/// similar**, so search results can always be ordered best-first by a single
/// descending sort.
///
/// - **Cosine**: angle between vectors, ignores magnitude. Default for text embeddings.
/// - **Euclidean**: L2 distance, mapped to `1 / (1 + d)`.
/// - **DotProduct**: raw inner product, for pre-normalized embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// Cosine similarity. Range: [-1, 1], where 1 means identical direction.
    #[default]
    Cosine,

    /// Euclidean (L2) distance, reported as `1 / (1 + distance)` in (0, 1].
    #[cfg_attr(feature = "serde", serde(alias = "l2"))]
    Euclidean,

    /// Dot product. Range: (-inf, inf).
    #[cfg_attr(feature = "serde", serde(alias = "dot"))]
    DotProduct,
}

impl DistanceMetric {
    /// Compute the similarity score between two vectors.
    ///
    /// Callers must pass vectors of equal length.
    #[inline]
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::Cosine => cosine_similarity(a, b),
            DistanceMetric::Euclidean => 1.0 / (1.0 + euclidean_distance(a, b)),
            DistanceMetric::DotProduct => dot_product(a, b),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot_product",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[inline]
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

#[inline]
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = DistanceMetric::Cosine.similarity(&a, &a);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(DistanceMetric::Cosine.similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        let sim = DistanceMetric::Cosine.similarity(&a, &b);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(DistanceMetric::Cosine.similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_euclidean_similarity() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![3.0, 4.0, 0.0];
        assert!((DistanceMetric::Euclidean.similarity(&a, &b) - 1.0 / 6.0).abs() < 0.0001);
    }

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((DistanceMetric::DotProduct.similarity(&a, &b) - 32.0).abs() < 0.0001);
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(DistanceMetric::Cosine.to_string(), "cosine");
        assert_eq!(DistanceMetric::DotProduct.to_string(), "dot_product");
    }
}
