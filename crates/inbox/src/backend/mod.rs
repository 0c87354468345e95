//! Mail-sync backend collaborator
//!
//! The backend owns the mailboxes; this crate only holds a cached
//! projection of them. [`MailSyncBackend`] is the seam the coordinators
//! talk through: an HTTP implementation for production and an in-memory
//! recording stub for tests.

mod http;
mod memory;
mod wire;

pub use http::HttpBackend;
pub use memory::{InMemoryBackend, Op, RecordedRequest};
pub use wire::{InboxQuery, InboxResponse, SyncOutcome, SyncResponse};

use crate::compose::ReplyEnvelope;
use crate::models::{Message, MessageId};

/// Failure reported by a backend call
///
/// A 404 is the only status the core distinguishes; every other
/// non-success outcome collapses into rejected-or-network.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The request never completed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The target resource no longer exists server-side
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The request completed but the backend refused it
    #[error("Request rejected: {message}")]
    Rejected { message: String },
}

/// Operations consumed from the remote mail-sync engine
pub trait MailSyncBackend: Send + Sync {
    /// Fetch the inbox projection matching the given query
    fn get_inbox_messages(&self, query: &InboxQuery) -> Result<Vec<Message>, BackendError>;

    /// Set the read flag on a message
    fn mark_as_read(&self, id: &MessageId, is_read: bool) -> Result<(), BackendError>;

    /// Set the star flag on a message
    fn toggle_star(&self, id: &MessageId, is_starred: bool) -> Result<(), BackendError>;

    /// Delete a message
    fn delete_message(&self, id: &MessageId) -> Result<(), BackendError>;

    /// Pull new mail for an account into server-side storage
    fn sync_inbox(&self, account_id: &str) -> Result<SyncOutcome, BackendError>;

    /// Send a threaded reply
    fn send_reply(&self, reply: &ReplyEnvelope) -> Result<(), BackendError>;
}
