//! # helpdesk-rag
//!
//! The retrieval core of a customer-support assistant: ingest a directory
//! of documents into a vector index, retrieve ranked evidence for a user
//! question, format it into prompt-ready context with citations, and decide
//! whether the evidence is strong enough to answer or a support ticket
//! should be offered instead.
//!
//! The chat UI, the language-model call, and the ticket-tracker client are
//! external collaborators. The entire surface they need from this crate is
//! three calls:
//!
//! - [`Retriever::retrieve`] — ranked, distance-ascending evidence
//! - [`format_context`] — one prompt block plus deduplicated [`Citation`]s
//! - [`FallbackPolicy::should_fallback`] — "offer a ticket?" heuristic
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use helpdesk_rag::{
//!     DistanceMetric, DistanceThresholdPolicy, FallbackPolicy, InMemoryStore, Ingestor,
//!     RagConfig, Retriever, SlidingWindowChunker, format_context,
//! };
//!
//! # async fn run(embedder: Arc<dyn helpdesk_rag::EmbeddingProvider>) -> helpdesk_rag::Result<()> {
//! let config = RagConfig::default();
//! let store = Arc::new(InMemoryStore::new(
//!     DistanceMetric::Cosine,
//!     embedder.dimensions(),
//!     embedder.model_id(),
//! ));
//!
//! // Offline: build the index once.
//! let chunker = Arc::new(SlidingWindowChunker::new(config.chunk_size, config.chunk_overlap)?);
//! let ingestor = Ingestor::new(config.clone(), chunker, embedder.clone(), store.clone());
//! ingestor.ingest_dir(Path::new("data")).await?;
//!
//! // Per request: retrieve, format, decide.
//! let retriever = Retriever::builder()
//!     .config(config.clone())
//!     .embedder(embedder)
//!     .store(store)
//!     .build()?;
//! let results = retriever.retrieve("how do I reset my password?").await?;
//! let formatted = format_context(&results);
//! let policy = DistanceThresholdPolicy::new(config.distance_threshold);
//! if policy.should_fallback(&results) {
//!     // offer to create a support ticket
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `openai` — [`OpenAiEmbedder`](openai::OpenAiEmbedder), an
//!   [`EmbeddingProvider`] over the OpenAI embeddings API.

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod fallback;
pub mod ingest;
pub mod memory;
pub mod retriever;
pub mod store;
pub mod ticket;

#[cfg(feature = "openai")]
pub mod openai;

pub use chunking::{Chunker, SlidingWindowChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{Citation, FormattedContext, format_context};
pub use document::{Chunk, ChunkMeta, RetrievalResult};
pub use embedding::EmbeddingProvider;
pub use error::{HelpdeskError, Result};
pub use fallback::{DistanceThresholdPolicy, FallbackPolicy};
pub use ingest::{FileFailure, IngestReport, Ingestor};
pub use memory::InMemoryStore;
pub use retriever::{Retriever, RetrieverBuilder};
pub use store::{DistanceMetric, DocumentStore};
pub use ticket::{TicketDraft, TicketReceipt, TicketTracker};
