//! Context formatting: turn ranked results into a prompt-ready text block
//! and a deduplicated citation list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::RetrievalResult;

/// A `(source, page)` reference attached to retrieved evidence.
///
/// Citations are deduplicated by exact pair equality; `(manual.pdf, 1)` and
/// `(manual.pdf, 2)` are distinct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Citation {
    /// File name of the source document.
    pub source: String,
    /// 1-based page number, absent for non-paginated sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{}, page {page}", self.source),
            None => write!(f, "{}", self.source),
        }
    }
}

/// The output of [`format_context`]: one prompt-ready block of evidence and
/// the citations backing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedContext {
    /// Tagged evidence blocks, separated by blank lines, in the results'
    /// distance-ascending order. Empty when there were no results.
    pub context: String,
    /// Deduplicated citations in first-seen order.
    pub citations: Vec<Citation>,
}

impl FormattedContext {
    /// Render the citations as display lines, one `- source[, page N]`
    /// bullet per citation.
    pub fn citation_lines(&self) -> String {
        self.citations.iter().map(|c| format!("- {c}")).collect::<Vec<_>>().join("\n")
    }
}

/// Format ranked results into a context block plus citations.
///
/// Each result gets a 1-based tag `[i]` labelled with its source and, for
/// paginated sources, `p.{page}`; the block is `"{tag}\n{text}"`. Blocks
/// are joined by blank lines, preserving the input order. Citations are
/// collected in the same order and deduplicated, keeping the first
/// occurrence of each `(source, page)` pair.
///
/// Empty input yields an empty context string and no citations.
pub fn format_context(results: &[RetrievalResult]) -> FormattedContext {
    let mut blocks = Vec::with_capacity(results.len());
    let mut citations: Vec<Citation> = Vec::new();

    for (i, result) in results.iter().enumerate() {
        let tag = match result.meta.page {
            Some(page) => format!("[{}] {} p.{page}", i + 1, result.meta.source),
            None => format!("[{}] {}", i + 1, result.meta.source),
        };
        blocks.push(format!("{tag}\n{}", result.text));

        let citation = Citation { source: result.meta.source.clone(), page: result.meta.page };
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    FormattedContext { context: blocks.join("\n\n"), citations }
}
