//! Document store trait and distance metrics.

use async_trait::async_trait;

use crate::document::{Chunk, RetrievalResult};
use crate::error::Result;

/// The dissimilarity metric used by a store.
///
/// Fixed at store creation: the metric must match the training objective of
/// the embedding model, and the fallback threshold is calibrated against
/// one metric. This is a configuration invariant, not a per-query choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DistanceMetric {
    /// Cosine distance: `1 - cosine_similarity`. Range `[0, 2]`.
    #[default]
    Cosine,
    /// Euclidean (L2) distance.
    L2,
}

impl DistanceMetric {
    /// Compute the distance between two vectors of equal length.
    ///
    /// Smaller means more similar. For [`Cosine`](DistanceMetric::Cosine),
    /// a zero-magnitude vector yields the maximum distance 1.0 rather than
    /// dividing by zero.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Cosine => {
                let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
                let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 1.0;
                }
                1.0 - dot / (norm_a * norm_b)
            }
            DistanceMetric::L2 => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt(),
        }
    }
}

/// A storage backend for embedded chunks with nearest-neighbor lookup.
///
/// A store is created against one embedding model (recorded as
/// [`model_id`](DocumentStore::model_id)), one dimensionality, and one
/// [`DistanceMetric`]. Upserting replaces by chunk id, so re-ingestion is
/// idempotent. Concurrent queries must be safe alongside upserts: a query
/// observes either the pre- or post-upsert state, never a torn batch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The distance metric fixed at store creation.
    fn metric(&self) -> DistanceMetric;

    /// The embedding-model identifier the index was built with.
    fn model_id(&self) -> &str;

    /// The embedding dimensionality fixed at store creation.
    fn dimensions(&self) -> usize;

    /// Insert or replace chunks by id. Chunks must carry embeddings of the
    /// store's dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`HelpdeskError::DimensionMismatch`](crate::HelpdeskError::DimensionMismatch)
    /// if any chunk's embedding length differs from the store's, without
    /// committing any chunk of the call.
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()>;

    /// Return the `k` stored chunks nearest to `embedding`, ascending by
    /// distance.
    ///
    /// `k` greater than the number of stored chunks returns everything;
    /// querying an empty store returns an empty `Vec`. Callers treat an
    /// empty result as "no evidence", not as an error.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievalResult>>;

    /// Number of chunks currently stored.
    async fn count(&self) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_distance_of_identical_vectors_is_zero() {
        let v = [0.6f32, 0.8, 0.0];
        let d = DistanceMetric::Cosine.distance(&v, &v);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn cosine_distance_of_orthogonal_vectors_is_one() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        let d = DistanceMetric::Cosine.distance(&a, &b);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_distance_handles_zero_vector() {
        let a = [0.0f32, 0.0];
        let b = [1.0f32, 0.0];
        assert_eq!(DistanceMetric::Cosine.distance(&a, &b), 1.0);
    }

    #[test]
    fn l2_distance_matches_euclidean_norm() {
        let a = [0.0f32, 0.0];
        let b = [3.0f32, 4.0];
        let d = DistanceMetric::L2.distance(&a, &b);
        assert!((d - 5.0).abs() < 1e-6);
    }
}
