//! In-memory document store.
//!
//! [`InMemoryStore`] keeps chunks in a `HashMap` behind a
//! `tokio::sync::RwLock`. It is the reference [`DocumentStore`] for
//! development and testing, and is adequate for corpora that fit in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, RetrievalResult};
use crate::error::{HelpdeskError, Result};
use crate::store::{DistanceMetric, DocumentStore};

/// An in-memory [`DocumentStore`] with brute-force nearest-neighbor search.
///
/// Upserts take the write lock for the whole batch, so concurrent queries
/// observe either the pre- or post-upsert state. Queries take the read
/// lock and may run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use helpdesk_rag::{DistanceMetric, InMemoryStore};
///
/// let store = InMemoryStore::new(DistanceMetric::Cosine, 384, "all-MiniLM-L6-v2");
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    metric: DistanceMetric,
    model_id: String,
    dimensions: usize,
    chunks: RwLock<HashMap<String, Chunk>>,
}

impl InMemoryStore {
    /// Create an empty store bound to one metric, dimensionality, and
    /// embedding model.
    pub fn new(metric: DistanceMetric, dimensions: usize, model_id: impl Into<String>) -> Self {
        Self { metric, model_id: model_id.into(), dimensions, chunks: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        // Validate the whole batch before touching the map, so a bad chunk
        // cannot leave the call half-committed.
        for chunk in chunks {
            if chunk.embedding.len() != self.dimensions {
                return Err(HelpdeskError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: chunk.embedding.len(),
                });
            }
        }

        let mut map = self.chunks.write().await;
        for chunk in chunks {
            map.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievalResult>> {
        if embedding.len() != self.dimensions {
            return Err(HelpdeskError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        let map = self.chunks.read().await;
        let mut results: Vec<RetrievalResult> = map
            .values()
            .map(|chunk| RetrievalResult {
                text: chunk.text.clone(),
                meta: chunk.meta.clone(),
                distance: self.metric.distance(&chunk.embedding, embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.chunks.read().await.len())
    }
}
