//! In-memory message cache with selection tracking
//!
//! The store is the single owner of inbox client state: the ordered list
//! of cached messages, the id of the message open in the detail view, and
//! the set of multi-selected ids for bulk actions. Components share one
//! store via `Arc` and mutate it only through this API.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::models::{Message, MessageId};

/// Partial update applied to a cached message
///
/// Only the two locally-mutable flags can be patched; every other field
/// is a server-authoritative snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePatch {
    pub is_read: Option<bool>,
    pub is_starred: Option<bool>,
}

impl MessagePatch {
    pub fn read(is_read: bool) -> Self {
        Self {
            is_read: Some(is_read),
            ..Self::default()
        }
    }

    pub fn starred(is_starred: bool) -> Self {
        Self {
            is_starred: Some(is_starred),
            ..Self::default()
        }
    }
}

/// Client-side cache of inbox messages
///
/// Insertion order is the canonical display order; filters only subset
/// it. All operations are synchronous and immediately observable.
pub struct MessageStore {
    /// Cached messages in fetch order
    messages: RwLock<Vec<Message>>,
    /// Id of the message open in the detail view, if any
    open_id: RwLock<Option<MessageId>>,
    /// Ids multi-selected for bulk actions
    multi_selected: RwLock<HashSet<MessageId>>,
}

impl MessageStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            open_id: RwLock::new(None),
            multi_selected: RwLock::new(HashSet::new()),
        }
    }

    /// Replace the entire cache with a freshly fetched sequence.
    ///
    /// The open selection survives only if its id is present in the new
    /// sequence. Multi-selected ids no longer present are pruned.
    pub fn load(&self, fresh: Vec<Message>) {
        let ids: HashSet<MessageId> = fresh.iter().map(|m| m.id.clone()).collect();

        *self.messages.write().unwrap() = fresh;

        let mut open = self.open_id.write().unwrap();
        if let Some(id) = open.as_ref() {
            if !ids.contains(id) {
                *open = None;
            }
        }

        self.multi_selected
            .write()
            .unwrap()
            .retain(|id| ids.contains(id));
    }

    /// Apply a partial update to the matching entry.
    ///
    /// Silent no-op when the id is not cached; returns whether an entry
    /// was actually patched.
    pub fn patch(&self, id: &MessageId, patch: MessagePatch) -> bool {
        let mut messages = self.messages.write().unwrap();
        match messages.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                if let Some(is_read) = patch.is_read {
                    message.is_read = is_read;
                }
                if let Some(is_starred) = patch.is_starred {
                    message.is_starred = is_starred;
                }
                true
            }
            None => false,
        }
    }

    /// Remove the matching entry from the cache.
    ///
    /// Clears the open selection if it pointed at the removed entry and
    /// prunes the id from the multi-select set. Returns the removed
    /// message, if it was cached.
    pub fn remove(&self, id: &MessageId) -> Option<Message> {
        let removed = {
            let mut messages = self.messages.write().unwrap();
            let pos = messages.iter().position(|m| &m.id == id)?;
            Some(messages.remove(pos))
        };

        let mut open = self.open_id.write().unwrap();
        if open.as_ref() == Some(id) {
            *open = None;
        }
        self.multi_selected.write().unwrap().remove(id);

        removed
    }

    /// Get a snapshot of the matching entry
    pub fn get(&self, id: &MessageId) -> Option<Message> {
        let messages = self.messages.read().unwrap();
        messages.iter().find(|m| &m.id == id).cloned()
    }

    /// Snapshot of all cached messages in display order
    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().unwrap().clone()
    }

    /// Number of cached messages
    pub fn len(&self) -> usize {
        self.messages.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().unwrap().is_empty()
    }

    // === Open selection ===

    /// Set the open selection; no-op when the id is not cached.
    ///
    /// Returns whether the selection was set.
    pub fn set_open(&self, id: &MessageId) -> bool {
        let present = {
            let messages = self.messages.read().unwrap();
            messages.iter().any(|m| &m.id == id)
        };
        if present {
            *self.open_id.write().unwrap() = Some(id.clone());
        }
        present
    }

    /// Clear the open selection
    pub fn clear_open(&self) {
        *self.open_id.write().unwrap() = None;
    }

    /// Id of the currently open message, if any
    pub fn open_id(&self) -> Option<MessageId> {
        self.open_id.read().unwrap().clone()
    }

    /// Snapshot of the currently open message, if any
    pub fn open_message(&self) -> Option<Message> {
        let id = self.open_id()?;
        self.get(&id)
    }

    // === Multi-select ===

    /// Flip multi-select membership for an id
    pub fn toggle_multi(&self, id: &MessageId) {
        let mut selected = self.multi_selected.write().unwrap();
        if !selected.remove(id) {
            selected.insert(id.clone());
        }
    }

    pub fn is_multi_selected(&self, id: &MessageId) -> bool {
        self.multi_selected.read().unwrap().contains(id)
    }

    /// Snapshot of the multi-selected ids
    pub fn multi_selected(&self) -> HashSet<MessageId> {
        self.multi_selected.read().unwrap().clone()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
