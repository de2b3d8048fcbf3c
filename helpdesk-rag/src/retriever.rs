//! Query-time retrieval: embed the query, look up the nearest chunks.
//!
//! The [`Retriever`] composes the process-wide [`EmbeddingProvider`] and
//! [`DocumentStore`] instances. Construct one at startup via
//! [`Retriever::builder()`] and share it across requests; it holds only
//! `Arc`s and a small config.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use helpdesk_rag::{RagConfig, Retriever};
//!
//! let retriever = Retriever::builder()
//!     .config(RagConfig::default())
//!     .embedder(embedder.clone())
//!     .store(store.clone())
//!     .build()?;
//!
//! let results = retriever.retrieve("how do I reset my password?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::RagConfig;
use crate::document::RetrievalResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{HelpdeskError, Result};
use crate::store::DocumentStore;

/// Embeds queries and returns the nearest stored chunks, ascending by
/// distance. No reranking is applied beyond the store's native ordering.
pub struct Retriever {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("config", &self.config)
            .field("embedder", &self.embedder.model_id())
            .field("store", &self.store.model_id())
            .finish()
    }
}

impl Retriever {
    /// Create a new [`RetrieverBuilder`].
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    /// Return a reference to the retriever configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Retrieve the configured `top_k` nearest chunks for `query`.
    ///
    /// # Errors
    ///
    /// Propagates [`HelpdeskError::Embedding`] and [`HelpdeskError::Store`]
    /// variants unchanged so callers can distinguish them. A caller that
    /// cannot retrieve should degrade to "no evidence" (empty results)
    /// rather than abort the conversation.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievalResult>> {
        self.retrieve_with_k(query, self.config.top_k).await
    }

    /// Retrieve with a per-call `k`, overriding the configured `top_k`.
    pub async fn retrieve_with_k(&self, query: &str, k: usize) -> Result<Vec<RetrievalResult>> {
        let query_embedding = self.embedder.embed(query).await.inspect_err(|e| {
            error!(error = %e, "query embedding failed");
        })?;

        let results = self.store.query(&query_embedding, k).await.inspect_err(|e| {
            error!(error = %e, "store query failed");
        })?;

        info!(k, result_count = results.len(), "retrieval completed");
        Ok(results)
    }
}

/// Builder for constructing a [`Retriever`].
///
/// All fields are required. [`build()`](RetrieverBuilder::build) validates
/// that the embedding provider matches the model the store was indexed
/// with, so a misconfigured process fails at startup instead of returning
/// meaningless distances at query time.
#[derive(Default)]
pub struct RetrieverBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl RetrieverBuilder {
    /// Set the retriever configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the document store.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the [`Retriever`].
    ///
    /// # Errors
    ///
    /// - [`HelpdeskError::Config`] if a required field is missing.
    /// - [`HelpdeskError::ModelMismatch`] if the store was indexed with a
    ///   different embedding model than the provider reports.
    /// - [`HelpdeskError::DimensionMismatch`] if the provider and store
    ///   disagree on dimensionality.
    pub fn build(self) -> Result<Retriever> {
        let config =
            self.config.ok_or_else(|| HelpdeskError::Config("config is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| HelpdeskError::Config("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| HelpdeskError::Config("store is required".to_string()))?;

        if embedder.model_id() != store.model_id() {
            return Err(HelpdeskError::ModelMismatch {
                store: store.model_id().to_string(),
                provider: embedder.model_id().to_string(),
            });
        }
        if embedder.dimensions() != store.dimensions() {
            return Err(HelpdeskError::DimensionMismatch {
                expected: store.dimensions(),
                actual: embedder.dimensions(),
            });
        }

        Ok(Retriever { config, embedder, store })
    }
}
