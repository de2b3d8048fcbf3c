//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and its default
//! implementation, [`SlidingWindowChunker`], which splits text into
//! overlapping fixed-size windows by character count.

use crate::error::{HelpdeskError, Result};

/// A strategy for splitting raw document text into chunks.
///
/// Implementations produce plain text spans; ids, metadata, and embeddings
/// are attached later by the ingestion pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into an ordered sequence of chunks.
    ///
    /// Returns an empty `Vec` for empty or whitespace-only input.
    /// No returned chunk is empty.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Splits text into fixed-size windows by character count with a
/// configurable overlap between consecutive windows.
///
/// Window positions are character positions, so multi-byte UTF-8 input is
/// never split mid-character. The last chunk may be shorter than the
/// configured size.
///
/// # Example
///
/// ```rust,ignore
/// use helpdesk_rag::SlidingWindowChunker;
///
/// let chunker = SlidingWindowChunker::new(900, 150)?;
/// let chunks = chunker.chunk(&text);
/// ```
#[derive(Debug, Clone)]
pub struct SlidingWindowChunker {
    size: usize,
    overlap: usize,
}

impl SlidingWindowChunker {
    /// Create a new `SlidingWindowChunker`.
    ///
    /// # Arguments
    ///
    /// * `size` — maximum number of characters per chunk
    /// * `overlap` — number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`HelpdeskError::Config`] if `size == 0` or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 {
            return Err(HelpdeskError::Config("chunk size must be greater than zero".to_string()));
        }
        if overlap >= size {
            return Err(HelpdeskError::Config(format!(
                "chunk overlap ({overlap}) must be less than chunk size ({size})"
            )));
        }
        Ok(Self { size, overlap })
    }
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, plus the end of the text,
        // so windows can be indexed by character position.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        // Advancement is at least 1, so the loop always terminates.
        let step = (self.size - self.overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < char_count {
            let end = (start + self.size).min(char_count);
            chunks.push(text[bounds[start]..bounds[end]].to_string());
            start += step;
        }

        chunks
    }
}
