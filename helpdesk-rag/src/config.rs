//! Configuration for ingestion and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 900;
/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;
/// Default number of results returned per query.
pub const DEFAULT_TOP_K: usize = 5;
/// Default distance threshold for the fallback decision.
///
/// Calibrated against cosine distance. Recalibrate when changing the
/// distance metric or the embedding model.
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 0.75;
/// Default maximum number of chunks per upsert batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Configuration parameters shared by ingestion and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of top results to return from similarity search.
    pub top_k: usize,
    /// Distance threshold for the fallback decision; best-match distances
    /// above this count as "no adequate evidence".
    pub distance_threshold: f32,
    /// Maximum number of chunks per store upsert batch.
    pub max_batch_size: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of top results to return from similarity search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the distance threshold for the fallback decision.
    pub fn distance_threshold(mut self, threshold: f32) -> Self {
        self.config.distance_threshold = threshold;
        self
    }

    /// Set the maximum number of chunks per store upsert batch.
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.config.max_batch_size = size;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`HelpdeskError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `distance_threshold` is negative or not finite
    /// - `max_batch_size == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(HelpdeskError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(HelpdeskError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(HelpdeskError::Config("top_k must be greater than zero".to_string()));
        }
        if !self.config.distance_threshold.is_finite() || self.config.distance_threshold < 0.0 {
            return Err(HelpdeskError::Config(format!(
                "distance_threshold ({}) must be finite and non-negative",
                self.config.distance_threshold
            )));
        }
        if self.config.max_batch_size == 0 {
            return Err(HelpdeskError::Config(
                "max_batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
