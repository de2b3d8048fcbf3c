//! Offline ingestion: read a directory of documents, chunk, embed, and
//! upsert into the document store.
//!
//! Recognized extensions are `.pdf` (text extracted per page, 1-based page
//! numbers) and `.txt`/`.md` (whole-file text, no page attribution). Other
//! extensions are skipped. A file that cannot be read is reported and the
//! run continues; a run that produces no chunks at all aborts with
//! [`HelpdeskError::EmptyCorpus`].
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk_rag::{Ingestor, RagConfig, SlidingWindowChunker};
//!
//! let config = RagConfig::default();
//! let chunker = Arc::new(SlidingWindowChunker::new(config.chunk_size, config.chunk_overlap)?);
//! let ingestor = Ingestor::new(config, chunker, embedder.clone(), store.clone());
//! let report = ingestor.ingest_dir(Path::new("data")).await?;
//! println!("ingested {} chunks", report.chunks);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, ChunkMeta};
use crate::embedding::EmbeddingProvider;
use crate::error::{HelpdeskError, Result};
use crate::store::DocumentStore;

/// A file that could not be read during ingestion. The run continued
/// without it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFailure {
    /// File name of the unreadable document.
    pub file: String,
    /// A description of the read failure.
    pub message: String,
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of files read and chunked.
    pub files_read: usize,
    /// Number of files skipped because of an unrecognized extension.
    pub files_skipped: usize,
    /// Number of chunks embedded and upserted.
    pub chunks: usize,
    /// Files that could not be read.
    pub failures: Vec<FileFailure>,
}

/// The batch ingestion job: directory scan → chunk → embed → batched upsert.
///
/// Dependencies are injected once at construction; the same
/// [`EmbeddingProvider`] instance must also serve the
/// [`Retriever`](crate::Retriever), or distances stop being comparable.
pub struct Ingestor {
    config: RagConfig,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn DocumentStore>,
}

impl Ingestor {
    /// Create a new `Ingestor` from its collaborators.
    pub fn new(
        config: RagConfig,
        chunker: Arc<dyn Chunker>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self { config, chunker, embedder, store }
    }

    /// Ingest every recognized file in `dir`.
    ///
    /// Files are processed in file-name order, so chunk ids
    /// (`{filename}-{counter}`, counter global across the run) are
    /// reproducible and re-ingestion overwrites rather than duplicates.
    ///
    /// # Errors
    ///
    /// - [`HelpdeskError::Io`] if the directory itself cannot be listed.
    /// - [`HelpdeskError::EmptyCorpus`] if no chunks were produced.
    /// - [`HelpdeskError::Embedding`] if embedding the chunk texts fails.
    /// - [`HelpdeskError::BatchUpsert`] if a store batch fails; the error
    ///   reports the failing batch index and how many chunks were already
    ///   committed.
    pub async fn ingest_dir(&self, dir: &Path) -> Result<IngestReport> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(|source| HelpdeskError::Io { path: dir.display().to_string(), source })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .collect();
        entries.sort_by_key(|entry| entry.file_name());

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut counter: usize = 0;
        let mut files_read = 0;
        let mut files_skipped = 0;
        let mut failures: Vec<FileFailure> = Vec::new();

        for entry in entries {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let extension = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            match extension.as_str() {
                "pdf" => match read_pdf_pages(&path) {
                    Ok(pages) => {
                        files_read += 1;
                        for (page, text) in pages {
                            self.collect_chunks(
                                &text,
                                ChunkMeta::paged(&file_name, page),
                                &mut counter,
                                &mut chunks,
                            );
                        }
                    }
                    Err(e) => {
                        warn!(file = %file_name, error = %e, "skipping unreadable PDF");
                        failures.push(FileFailure { file: file_name, message: e.to_string() });
                    }
                },
                "txt" | "md" => match std::fs::read_to_string(&path) {
                    Ok(text) => {
                        files_read += 1;
                        self.collect_chunks(
                            &text,
                            ChunkMeta::unpaged(&file_name),
                            &mut counter,
                            &mut chunks,
                        );
                    }
                    Err(e) => {
                        warn!(file = %file_name, error = %e, "skipping unreadable text file");
                        failures.push(FileFailure { file: file_name, message: e.to_string() });
                    }
                },
                _ => {
                    debug!(file = %file_name, "skipping unrecognized extension");
                    files_skipped += 1;
                }
            }
        }

        if chunks.is_empty() {
            return Err(HelpdeskError::EmptyCorpus { dir: dir.display().to_string() });
        }

        self.embed_chunks(&mut chunks).await?;
        self.upsert_batched(&chunks).await?;

        let report = IngestReport { files_read, files_skipped, chunks: chunks.len(), failures };
        info!(
            files_read = report.files_read,
            files_skipped = report.files_skipped,
            chunks = report.chunks,
            failures = report.failures.len(),
            "ingestion completed"
        );
        Ok(report)
    }

    /// Chunk one text span and append the chunks with ids drawn from the
    /// run-wide counter.
    fn collect_chunks(
        &self,
        text: &str,
        meta: ChunkMeta,
        counter: &mut usize,
        chunks: &mut Vec<Chunk>,
    ) {
        for text in self.chunker.chunk(text) {
            chunks.push(Chunk {
                id: format!("{}-{counter}", meta.source),
                text,
                meta: meta.clone(),
                embedding: Vec::new(),
            });
            *counter += 1;
        }
    }

    /// Embed all chunk texts in one provider batch and attach the vectors.
    async fn embed_chunks(&self, chunks: &mut [Chunk]) -> Result<()> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        debug!(batch_size = texts.len(), "embedding chunk batch");

        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(HelpdeskError::Embedding {
                provider: self.embedder.model_id().to_string(),
                message: format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            });
        }

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }
        Ok(())
    }

    /// Upsert chunks in batches of at most `max_batch_size`, failing fast
    /// with the index of the batch that did not commit.
    async fn upsert_batched(&self, chunks: &[Chunk]) -> Result<()> {
        let mut committed = 0;
        for (batch_index, batch) in chunks.chunks(self.config.max_batch_size).enumerate() {
            self.store.upsert(batch).await.map_err(|e| {
                warn!(batch_index, committed, error = %e, "upsert batch failed");
                HelpdeskError::BatchUpsert { batch_index, committed, message: e.to_string() }
            })?;
            committed += batch.len();
            debug!(batch_index, committed, "upsert batch committed");
        }
        Ok(())
    }
}

/// Extract per-page text from a PDF. Pages are 1-based; a page whose text
/// cannot be decoded contributes an empty string rather than failing the
/// whole file.
fn read_pdf_pages(path: &Path) -> std::result::Result<Vec<(u32, String)>, lopdf::Error> {
    let doc = lopdf::Document::load(path)?;
    let pages = doc
        .get_pages()
        .keys()
        .map(|&page| {
            let text = doc.extract_text(&[page]).unwrap_or_default();
            (page, text)
        })
        .collect();
    Ok(pages)
}
