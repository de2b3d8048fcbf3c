//! The ticket handoff seam.
//!
//! When the fallback decision fires and the user agrees, the orchestration
//! layer gathers a [`TicketDraft`] and hands it to whatever tracker client
//! it is wired with. The core defines only the typed handoff; it has no
//! knowledge of any tracker's protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The fields the core supplies for ticket creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketDraft {
    /// Name of the user requesting support.
    pub user_name: String,
    /// Email of the user requesting support.
    pub user_email: String,
    /// One-line summary of the issue.
    pub summary: String,
    /// Full issue description, typically including the unanswered question.
    pub description: String,
}

/// The tracker's acknowledgment of a created ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketReceipt {
    /// Link to the created ticket, if the tracker provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tracker-assigned ticket number, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
}

/// An external issue tracker, as seen from the core.
///
/// Implementations live in the orchestration layer (GitHub Issues, Jira,
/// a test double); the core only depends on this trait.
#[async_trait]
pub trait TicketTracker: Send + Sync {
    /// Create a ticket from the draft.
    async fn create(&self, draft: &TicketDraft) -> Result<TicketReceipt>;
}
