//! In-memory backend implementation
//!
//! Recording stub used by tests and by hosts that want to drive the
//! coordinators without a live mail-sync engine. Records every request,
//! keeps its own copy of the server-side inbox, and supports per-operation
//! failure injection.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use super::wire::{InboxQuery, SyncOutcome};
use super::{BackendError, MailSyncBackend};
use crate::compose::ReplyEnvelope;
use crate::models::{Message, MessageId};

/// A request the stub has received, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Fetch(InboxQuery),
    MarkRead { id: MessageId, is_read: bool },
    ToggleStar { id: MessageId, is_starred: bool },
    Delete { id: MessageId },
    Sync { account_id: String },
    Reply(ReplyEnvelope),
}

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Fetch,
    MarkRead,
    ToggleStar,
    Delete,
    Sync,
    Reply,
}

type SyncHook = Box<dyn Fn() + Send + Sync>;

/// In-memory implementation of [`MailSyncBackend`]
#[derive(Default)]
pub struct InMemoryBackend {
    /// Server-side inbox truth
    inbox: RwLock<Vec<Message>>,
    /// Everything the stub has been asked to do
    requests: RwLock<Vec<RecordedRequest>>,
    /// Injected failures, fired on every call until cleared
    failures: RwLock<HashMap<Op, BackendError>>,
    /// Emails-processed count reported by sync
    sync_result: RwLock<u64>,
    /// Callback invoked mid-sync, before the result is returned
    sync_hook: Mutex<Option<SyncHook>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the server-side inbox
    pub fn seed(&self, messages: Vec<Message>) {
        *self.inbox.write().unwrap() = messages;
    }

    /// Make the given operation fail until [`clear_failure`](Self::clear_failure)
    pub fn fail_with(&self, op: Op, error: BackendError) {
        self.failures.write().unwrap().insert(op, error);
    }

    pub fn clear_failure(&self, op: Op) {
        self.failures.write().unwrap().remove(&op);
    }

    /// Set the emails-processed count the next sync reports
    pub fn set_sync_result(&self, emails_processed: u64) {
        *self.sync_result.write().unwrap() = emails_processed;
    }

    /// Install a callback that runs while a sync request is in progress.
    ///
    /// Lets tests observe coordinator state at the suspension point.
    pub fn set_sync_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.sync_hook.lock().unwrap() = Some(Box::new(hook));
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Snapshot of the server-side copy of a message
    pub fn server_message(&self, id: &MessageId) -> Option<Message> {
        self.inbox.read().unwrap().iter().find(|m| &m.id == id).cloned()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.write().unwrap().push(request);
    }

    fn check_failure(&self, op: Op) -> Result<(), BackendError> {
        match self.failures.read().unwrap().get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl MailSyncBackend for InMemoryBackend {
    fn get_inbox_messages(&self, query: &InboxQuery) -> Result<Vec<Message>, BackendError> {
        self.record(RecordedRequest::Fetch(query.clone()));
        self.check_failure(Op::Fetch)?;

        let inbox = self.inbox.read().unwrap();
        let messages = inbox
            .iter()
            .filter(|m| query.is_read.is_none_or(|is_read| m.is_read == is_read))
            .filter(|m| !query.exclude_warmup || m.campaign_id.is_none())
            .cloned()
            .collect();
        Ok(messages)
    }

    fn mark_as_read(&self, id: &MessageId, is_read: bool) -> Result<(), BackendError> {
        self.record(RecordedRequest::MarkRead {
            id: id.clone(),
            is_read,
        });
        self.check_failure(Op::MarkRead)?;

        let mut inbox = self.inbox.write().unwrap();
        match inbox.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                message.is_read = is_read;
                Ok(())
            }
            None => Err(BackendError::NotFound {
                resource: format!("message {}", id.as_str()),
            }),
        }
    }

    fn toggle_star(&self, id: &MessageId, is_starred: bool) -> Result<(), BackendError> {
        self.record(RecordedRequest::ToggleStar {
            id: id.clone(),
            is_starred,
        });
        self.check_failure(Op::ToggleStar)?;

        let mut inbox = self.inbox.write().unwrap();
        match inbox.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                message.is_starred = is_starred;
                Ok(())
            }
            None => Err(BackendError::NotFound {
                resource: format!("message {}", id.as_str()),
            }),
        }
    }

    fn delete_message(&self, id: &MessageId) -> Result<(), BackendError> {
        self.record(RecordedRequest::Delete { id: id.clone() });
        self.check_failure(Op::Delete)?;

        let mut inbox = self.inbox.write().unwrap();
        match inbox.iter().position(|m| &m.id == id) {
            Some(pos) => {
                inbox.remove(pos);
                Ok(())
            }
            None => Err(BackendError::NotFound {
                resource: format!("message {}", id.as_str()),
            }),
        }
    }

    fn sync_inbox(&self, account_id: &str) -> Result<SyncOutcome, BackendError> {
        self.record(RecordedRequest::Sync {
            account_id: account_id.to_string(),
        });

        if let Some(hook) = self.sync_hook.lock().unwrap().as_ref() {
            hook();
        }

        self.check_failure(Op::Sync)?;
        Ok(SyncOutcome {
            emails_processed: *self.sync_result.read().unwrap(),
        })
    }

    fn send_reply(&self, reply: &ReplyEnvelope) -> Result<(), BackendError> {
        self.record(RecordedRequest::Reply(reply.clone()));
        self.check_failure(Op::Reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmailAddress;

    fn make_message(id: &str, is_read: bool) -> Message {
        Message::builder(MessageId::new(id), format!("proto-{}", id))
            .from(EmailAddress::new("test@example.com"))
            .is_read(is_read)
            .build()
    }

    #[test]
    fn test_fetch_applies_read_filter() {
        let backend = InMemoryBackend::new();
        backend.seed(vec![make_message("a", true), make_message("b", false)]);

        let query = InboxQuery {
            is_read: Some(false),
            ..InboxQuery::default()
        };
        let messages = backend.get_inbox_messages(&query).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id.as_str(), "b");
    }

    #[test]
    fn test_fetch_excludes_warmup_traffic() {
        let backend = InMemoryBackend::new();
        let mut warmup = make_message("w", false);
        warmup.campaign_id = Some("campaign-1".to_string());
        backend.seed(vec![make_message("a", false), warmup]);

        let messages = backend
            .get_inbox_messages(&InboxQuery::default())
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id.as_str(), "a");
    }

    #[test]
    fn test_failure_injection() {
        let backend = InMemoryBackend::new();
        backend.seed(vec![make_message("a", false)]);
        backend.fail_with(
            Op::Delete,
            BackendError::Network {
                message: "offline".to_string(),
            },
        );

        let result = backend.delete_message(&MessageId::new("a"));
        assert!(result.is_err());
        // Request is still recorded, server state untouched
        assert_eq!(backend.requests().len(), 1);
        assert!(backend.server_message(&MessageId::new("a")).is_some());

        backend.clear_failure(Op::Delete);
        backend.delete_message(&MessageId::new("a")).unwrap();
        assert!(backend.server_message(&MessageId::new("a")).is_none());
    }

    #[test]
    fn test_mutations_update_server_truth() {
        let backend = InMemoryBackend::new();
        backend.seed(vec![make_message("a", false)]);

        backend.mark_as_read(&MessageId::new("a"), true).unwrap();
        assert!(backend.server_message(&MessageId::new("a")).unwrap().is_read);

        backend.toggle_star(&MessageId::new("a"), true).unwrap();
        assert!(
            backend
                .server_message(&MessageId::new("a"))
                .unwrap()
                .is_starred
        );
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let backend = InMemoryBackend::new();
        let result = backend.mark_as_read(&MessageId::new("zz"), true);
        assert!(matches!(result, Err(BackendError::NotFound { .. })));
    }
}
