//! Inbox crate - Client-side reconciliation core for a mail-sync backend
//!
//! This crate provides the state management behind an inbox view:
//! - Domain models (Message, EmailAddress, EmailAccount)
//! - An in-memory message cache with open/multi selection tracking
//! - Server-side fetch filters plus client-side text search
//! - Optimistic mutations (read, star, delete, reply) with rollback
//! - A globally mutually-exclusive inbox sync that reloads the cache
//!
//! This crate has zero UI dependencies. A host application renders the
//! cache, forwards user intents to the coordinators, and displays the
//! notifications emitted through [`NotificationSink`].

pub mod actions;
pub mod backend;
pub mod compose;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod notify;
pub mod selection;
pub mod store;
pub mod sync;
pub mod timing;

pub use actions::MutationCoordinator;
pub use backend::{
    BackendError, HttpBackend, InMemoryBackend, InboxQuery, MailSyncBackend, Op, RecordedRequest,
    SyncOutcome,
};
pub use compose::ReplyEnvelope;
pub use config::BackendSettings;
pub use error::InboxError;
pub use filter::InboxFilter;
pub use models::{Attachment, EmailAccount, EmailAddress, Message, MessageId, ThreadEntry};
pub use notify::{LogSink, MemorySink, Notification, NotificationSink, Severity};
pub use selection::{OpenState, SelectionTracker};
pub use store::{MessagePatch, MessageStore};
pub use sync::{SyncCoordinator, SyncPhase, reload_inbox};
pub use timing::PendingReload;
