//! Data types for chunks, chunk metadata, and retrieval results.

use serde::{Deserialize, Serialize};

/// Provenance metadata attached to every chunk.
///
/// `page` is present for paginated sources (PDF) and absent for plain-text
/// sources (`.txt`/`.md`). Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkMeta {
    /// File name of the source document.
    pub source: String,
    /// 1-based page number, absent for non-paginated formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ChunkMeta {
    /// Metadata for a paginated source.
    pub fn paged(source: impl Into<String>, page: u32) -> Self {
        Self { source: source.into(), page: Some(page) }
    }

    /// Metadata for a non-paginated source.
    pub fn unpaged(source: impl Into<String>) -> Self {
        Self { source: source.into(), page: None }
    }
}

/// A bounded text span derived from a source document, with its embedding.
///
/// Chunks are the atomic unit of storage and retrieval. Ids follow the
/// `{filename}-{counter}` convention, with the counter spanning a whole
/// ingestion run, so re-ingesting the same corpus reproduces the same ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier within the store; upserting an existing id
    /// replaces the stored chunk.
    pub id: String,
    /// The text content of the chunk. Never empty.
    pub text: String,
    /// Provenance metadata.
    pub meta: ChunkMeta,
    /// The embedding vector for this chunk's text.
    pub embedding: Vec<f32>,
}

/// A retrieved chunk paired with its distance to the query embedding.
///
/// Distances are non-negative and smaller means more similar; result lists
/// are ordered ascending by distance. Produced per query and discarded
/// after formatting and the fallback decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The text of the retrieved chunk.
    pub text: String,
    /// Provenance metadata of the retrieved chunk.
    pub meta: ChunkMeta,
    /// Distance between the chunk and query embeddings (metric-dependent).
    pub distance: f32,
}
