//! Fallback decisioning: is the retrieved evidence strong enough to answer,
//! or should the caller offer to open a support ticket instead?
//!
//! The decision is a pluggable policy so alternative strategies
//! (score-margin, multi-signal) can be swapped in without touching the
//! [`Retriever`](crate::Retriever). The decision is a heuristic, not a
//! certainty signal: the orchestration layer is expected to combine it with
//! the generated answer (e.g. only escalate when the answer also fails to
//! cite the context) before actually creating a ticket.

use crate::document::RetrievalResult;

/// A policy deciding whether retrieved evidence is inadequate.
pub trait FallbackPolicy: Send + Sync {
    /// Return `true` when the caller should fall back (e.g. offer a ticket).
    fn should_fallback(&self, results: &[RetrievalResult]) -> bool;
}

/// The default policy: fall back when the best (smallest) distance exceeds
/// a threshold.
///
/// - Empty results always fall back: no evidence means no answer.
/// - Otherwise `min(distance) > threshold` — strictly greater, so a best
///   match exactly at the threshold still counts as adequate.
///
/// The threshold is corpus- and embedding-model-dependent; take it from
/// [`RagConfig::distance_threshold`](crate::RagConfig::distance_threshold)
/// rather than hardcoding a literal.
///
/// # Example
///
/// ```rust,ignore
/// use helpdesk_rag::{DistanceThresholdPolicy, FallbackPolicy, RagConfig};
///
/// let config = RagConfig::default();
/// let policy = DistanceThresholdPolicy::new(config.distance_threshold);
/// if policy.should_fallback(&results) {
///     // offer ticket creation
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DistanceThresholdPolicy {
    threshold: f32,
}

impl DistanceThresholdPolicy {
    /// Create a policy with the given distance threshold.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl FallbackPolicy for DistanceThresholdPolicy {
    fn should_fallback(&self, results: &[RetrievalResult]) -> bool {
        let Some(best) = results.iter().map(|r| r.distance).min_by(f32::total_cmp) else {
            return true;
        };
        best > self.threshold
    }
}
