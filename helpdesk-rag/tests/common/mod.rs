//! Shared test doubles: deterministic embedders and misbehaving stores.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use helpdesk_rag::{
    Chunk, ChunkMeta, DistanceMetric, DocumentStore, EmbeddingProvider, HelpdeskError,
    RetrievalResult,
};
use tokio::sync::Mutex;

pub const DIM: usize = 8;
pub const MODEL: &str = "mock-embedder-v1";

/// Deterministic hash-based embedder: the same text always maps to the
/// same normalized vector.
pub struct MockEmbedder {
    dimensions: usize,
    model: String,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self { dimensions: DIM, model: MODEL.to_string() }
    }

    pub fn with_model(model: &str) -> Self {
        Self { dimensions: DIM, model: model.to_string() }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions, model: MODEL.to_string() }
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> helpdesk_rag::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut v: Vec<f32> =
            (0..self.dimensions).map(|i| (hash.wrapping_add(i as u64) as f32).sin()).collect();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// An embedder whose calls always fail.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> helpdesk_rag::Result<Vec<f32>> {
        Err(HelpdeskError::Embedding {
            provider: MODEL.to_string(),
            message: "model unavailable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }

    fn model_id(&self) -> &str {
        MODEL
    }
}

/// A store that fails every call, for exercising degradation paths.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    fn metric(&self) -> DistanceMetric {
        DistanceMetric::Cosine
    }

    fn model_id(&self) -> &str {
        MODEL
    }

    fn dimensions(&self) -> usize {
        DIM
    }

    async fn upsert(&self, _chunks: &[Chunk]) -> helpdesk_rag::Result<()> {
        Err(HelpdeskError::Store {
            backend: "failing".to_string(),
            message: "connection refused".to_string(),
        })
    }

    async fn query(&self, _embedding: &[f32], _k: usize) -> helpdesk_rag::Result<Vec<RetrievalResult>> {
        Err(HelpdeskError::Store {
            backend: "failing".to_string(),
            message: "connection refused".to_string(),
        })
    }

    async fn count(&self) -> helpdesk_rag::Result<usize> {
        Err(HelpdeskError::Store {
            backend: "failing".to_string(),
            message: "connection refused".to_string(),
        })
    }
}

/// A store wrapper that records the chunk ids of every upsert batch and
/// can be told to fail from the nth upsert call onward.
pub struct RecordingStore {
    inner: Arc<dyn DocumentStore>,
    pub batches: Mutex<Vec<Vec<String>>>,
    fail_from_call: Option<usize>,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            batches: Mutex::new(Vec::new()),
            fail_from_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_from_call(inner: Arc<dyn DocumentStore>, call: usize) -> Self {
        Self {
            inner,
            batches: Mutex::new(Vec::new()),
            fail_from_call: Some(call),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    fn metric(&self) -> DistanceMetric {
        self.inner.metric()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    async fn upsert(&self, chunks: &[Chunk]) -> helpdesk_rag::Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fail_from) = self.fail_from_call {
            if call >= fail_from {
                return Err(HelpdeskError::Store {
                    backend: "recording".to_string(),
                    message: "injected failure".to_string(),
                });
            }
        }
        self.batches.lock().await.push(chunks.iter().map(|c| c.id.clone()).collect());
        self.inner.upsert(chunks).await
    }

    async fn query(&self, embedding: &[f32], k: usize) -> helpdesk_rag::Result<Vec<RetrievalResult>> {
        self.inner.query(embedding, k).await
    }

    async fn count(&self) -> helpdesk_rag::Result<usize> {
        self.inner.count().await
    }
}

/// Build a retrieval result for formatter/fallback tests.
pub fn result(source: &str, page: Option<u32>, distance: f32) -> RetrievalResult {
    RetrievalResult {
        text: format!("text from {source}"),
        meta: ChunkMeta { source: source.to_string(), page },
        distance,
    }
}

/// Build a stored chunk with an explicit embedding.
pub fn chunk(id: &str, source: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("text of {id}"),
        meta: ChunkMeta { source: source.to_string(), page: None },
        embedding,
    }
}
