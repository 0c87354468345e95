//! Mutation coordinator for inbox operations
//!
//! Coordinates between the mail-sync backend and the local cache.
//!
//! Read and star mutations are applied in two steps:
//! 1. Patch the cache optimistically so the view updates immediately
//! 2. Send the request; on failure, revert the patch and surface the error
//!
//! Deletion is the exception: it is destructive, so the cache entry is
//! only removed after the backend confirms. Failures never propagate as
//! panics; every one becomes a typed [`InboxError`] plus an error
//! notification through the host sink.

use log::{info, warn};
use std::sync::Arc;

use crate::backend::MailSyncBackend;
use crate::compose::ReplyEnvelope;
use crate::error::InboxError;
use crate::models::{EmailAccount, Message, MessageId};
use crate::notify::{Notification, NotificationSink};
use crate::store::{MessagePatch, MessageStore};
use crate::timing::PendingReload;

/// Handler for read, star, delete, and reply operations
pub struct MutationCoordinator {
    backend: Arc<dyn MailSyncBackend>,
    store: Arc<MessageStore>,
    sink: Arc<dyn NotificationSink>,
}

impl MutationCoordinator {
    /// Create a new mutation coordinator
    pub fn new(
        backend: Arc<dyn MailSyncBackend>,
        store: Arc<MessageStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            backend,
            store,
            sink,
        }
    }

    /// Set the read flag on a cached message.
    ///
    /// Optimistic: the cache is patched before the request goes out and
    /// reverted to the previous value if the request fails.
    pub fn mark_read(&self, id: &MessageId, is_read: bool) -> Result<(), InboxError> {
        let previous = match self.store.get(id) {
            Some(message) => message.is_read,
            None => {
                return self.fail(InboxError::not_found(format!(
                    "message {}",
                    id.as_str()
                )));
            }
        };

        if previous == is_read {
            return Ok(());
        }

        self.store.patch(id, MessagePatch::read(is_read));
        info!(
            "Marking message {} as {}",
            id.as_str(),
            if is_read { "read" } else { "unread" }
        );

        if let Err(e) = self.backend.mark_as_read(id, is_read) {
            self.store.patch(id, MessagePatch::read(previous));
            warn!("Mark-read failed for {}, reverted: {}", id.as_str(), e);
            return self.fail(e.into());
        }
        Ok(())
    }

    /// Flip the star flag on a cached message.
    ///
    /// The new value is the negation of the currently *cached* value, not
    /// whatever a possibly-stale server response would suggest. Reverted
    /// on failure.
    pub fn toggle_star(&self, id: &MessageId) -> Result<bool, InboxError> {
        let previous = match self.store.get(id) {
            Some(message) => message.is_starred,
            None => {
                return self.fail(InboxError::not_found(format!(
                    "message {}",
                    id.as_str()
                )));
            }
        };

        let starred = !previous;
        self.store.patch(id, MessagePatch::starred(starred));
        info!(
            "Toggling star for message {} to {}",
            id.as_str(),
            if starred { "starred" } else { "unstarred" }
        );

        if let Err(e) = self.backend.toggle_star(id, starred) {
            self.store.patch(id, MessagePatch::starred(previous));
            warn!("Star toggle failed for {}, reverted: {}", id.as_str(), e);
            return self.fail(e.into());
        }
        Ok(starred)
    }

    /// Delete a message.
    ///
    /// Never optimistic: the cache entry is removed only after the
    /// backend confirms, so a failed delete loses nothing.
    pub fn delete_message(&self, id: &MessageId) -> Result<(), InboxError> {
        if let Err(e) = self.backend.delete_message(id) {
            warn!("Delete failed for {}: {}", id.as_str(), e);
            return self.fail(e.into());
        }

        self.store.remove(id);
        info!("Deleted message {}", id.as_str());
        self.sink.notify(Notification::success("Message deleted"));
        Ok(())
    }

    /// Send a threaded reply to an open message.
    ///
    /// Requires non-empty trimmed content and a resolvable sending
    /// account; otherwise fails locally with `Validation` and no request
    /// is issued. On success the caller receives a [`PendingReload`] —
    /// the backend's copy of the reply is not visible synchronously, so
    /// the cache refetch is deferred by a bounded delay instead of run
    /// inline.
    pub fn send_reply(
        &self,
        original: &Message,
        content: &str,
        accounts: &[EmailAccount],
    ) -> Result<PendingReload, InboxError> {
        if content.trim().is_empty() {
            return self.fail(InboxError::validation("Reply content is empty"));
        }

        let account = match EmailAccount::default_account(accounts) {
            Some(account) => account,
            None => {
                return self.fail(InboxError::validation(
                    "No account available to send the reply from",
                ));
            }
        };

        let envelope = ReplyEnvelope::for_message(original, content.trim(), account.id.clone());
        info!(
            "Sending reply to {} (in reply to {})",
            envelope.to, envelope.in_reply_to
        );

        if let Err(e) = self.backend.send_reply(&envelope) {
            warn!("Reply to {} failed: {}", envelope.to, e);
            return self.fail(e.into());
        }

        self.sink.notify(Notification::success("Reply sent"));
        Ok(PendingReload::after_reply())
    }

    /// Surface an error as a notification and return it to the caller
    fn fail<T>(&self, error: InboxError) -> Result<T, InboxError> {
        self.sink.notify(Notification::error(error.to_string()));
        Err(error)
    }
}
