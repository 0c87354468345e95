//! Open/multi selection tracking
//!
//! The detail-view selection is a small state machine so the automatic
//! mark-as-read that fires when an unread message is opened is a named,
//! testable transition rather than inline side-effecting code:
//!
//! ```text
//! Closed --open(read msg)---> OpenRead
//! Closed --open(unread msg)-> OpenUnread --mark_read ok--> OpenRead
//!                                        --mark_read err-> OpenUnread
//! ```
//!
//! Multi-select is independent of the open selection: closing the detail
//! view never touches the bulk-action set.

use std::sync::{Arc, RwLock};

use crate::actions::MutationCoordinator;
use crate::error::InboxError;
use crate::models::MessageId;
use crate::store::MessageStore;

/// Detail-view selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    /// No message open
    Closed,
    /// An unread message is open; its mark-as-read did not go through
    OpenUnread,
    /// A message is open and known read
    OpenRead,
}

/// Tracks the open message and the multi-select set
pub struct SelectionTracker {
    store: Arc<MessageStore>,
    mutations: Arc<MutationCoordinator>,
    state: RwLock<OpenState>,
}

impl SelectionTracker {
    /// Create a new selection tracker
    pub fn new(store: Arc<MessageStore>, mutations: Arc<MutationCoordinator>) -> Self {
        Self {
            store,
            mutations,
            state: RwLock::new(OpenState::Closed),
        }
    }

    /// Open a message in the detail view.
    ///
    /// If the target is unread, fires mark-as-read exactly once per open
    /// action; a failed mark-as-read leaves the state `OpenUnread` (the
    /// cache was rolled back, the message is still unread). Returns the
    /// resulting state.
    pub fn open(&self, id: &MessageId) -> Result<OpenState, InboxError> {
        let message = self
            .store
            .get(id)
            .ok_or_else(|| InboxError::not_found(format!("message {}", id.as_str())))?;

        self.store.set_open(id);

        let next = if message.is_read {
            OpenState::OpenRead
        } else {
            *self.state.write().unwrap() = OpenState::OpenUnread;
            match self.mutations.mark_read(id, true) {
                Ok(()) => OpenState::OpenRead,
                Err(_) => OpenState::OpenUnread,
            }
        };

        *self.state.write().unwrap() = next;
        Ok(next)
    }

    /// Close the detail view; multi-select is unaffected
    pub fn close(&self) {
        self.store.clear_open();
        *self.state.write().unwrap() = OpenState::Closed;
    }

    /// Current detail-view state
    ///
    /// Reconciled against the store: if the open entry was deleted out
    /// from under the view, the state reads `Closed`.
    pub fn state(&self) -> OpenState {
        if self.store.open_id().is_none() {
            return OpenState::Closed;
        }
        *self.state.read().unwrap()
    }

    /// Flip multi-select membership for a message
    pub fn toggle_multi(&self, id: &MessageId) {
        self.store.toggle_multi(id);
    }
}
