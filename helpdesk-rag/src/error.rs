//! Error types for the `helpdesk-rag` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval core.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the document store backend.
    #[error("Store error ({backend}): {message}")]
    Store {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A batched upsert failed part-way through an ingestion run.
    ///
    /// Chunks in batches before `batch_index` were committed; the failing
    /// batch and everything after it were not.
    #[error("Upsert batch {batch_index} failed after {committed} chunks committed: {message}")]
    BatchUpsert {
        /// Zero-based index of the batch that failed.
        batch_index: usize,
        /// Number of chunks committed before the failure.
        committed: usize,
        /// A description of the failure.
        message: String,
    },

    /// The store was built against a different embedding model than the
    /// provider now in use. Mixing models invalidates distance comparisons.
    #[error("Embedding model mismatch: store is indexed with '{store}', provider is '{provider}'")]
    ModelMismatch {
        /// Model identifier recorded in the store.
        store: String,
        /// Model identifier reported by the embedding provider.
        provider: String,
    },

    /// An embedding vector did not match the store's dimensionality.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality fixed at store creation.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No ingestible documents were found. An empty corpus would silently
    /// turn every question into a fallback, so ingestion aborts instead.
    #[error("No documents found in '{dir}'")]
    EmptyCorpus {
        /// The directory that was scanned.
        dir: String,
    },

    /// An I/O failure outside the per-file recovery path (e.g. the
    /// ingestion directory itself is unreadable).
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path that could not be accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A convenience result type for retrieval-core operations.
pub type Result<T> = std::result::Result<T, HelpdeskError>;
