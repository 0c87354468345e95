//! Inbox sync coordination
//!
//! The backend owns the actual mail pull; the client only requests it and
//! reloads its cache afterwards. At most one sync may be in flight
//! process-wide — not one per account — and excess requests are rejected
//! outright rather than queued.

use log::{info, warn};
use std::sync::{Arc, Mutex};

use crate::backend::{MailSyncBackend, SyncOutcome};
use crate::error::InboxError;
use crate::filter::InboxFilter;
use crate::models::EmailAccount;
use crate::notify::{Notification, NotificationSink};
use crate::store::MessageStore;

/// Whether a sync is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Syncing,
}

/// Fetch a fresh inbox projection and replace the cache with it.
///
/// This is the only recovery mechanism after any inconsistency: there is
/// no persisted state beyond the in-memory cache.
pub fn reload_inbox(
    backend: &dyn MailSyncBackend,
    store: &MessageStore,
    filter: &InboxFilter,
) -> Result<usize, InboxError> {
    let messages = backend.get_inbox_messages(&filter.to_query())?;
    let count = messages.len();
    store.load(messages);
    info!("Reloaded inbox cache ({} messages)", count);
    Ok(count)
}

/// Coordinator for the non-overlapping inbox sync
pub struct SyncCoordinator {
    backend: Arc<dyn MailSyncBackend>,
    store: Arc<MessageStore>,
    sink: Arc<dyn NotificationSink>,
    phase: Mutex<SyncPhase>,
}

/// Resets the phase to idle when dropped, so the syncing indicator can
/// never get stuck regardless of which path the sync takes out.
struct PhaseGuard<'a> {
    phase: &'a Mutex<SyncPhase>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        *self.phase.lock().unwrap() = SyncPhase::Idle;
    }
}

impl SyncCoordinator {
    /// Create a new sync coordinator
    pub fn new(
        backend: Arc<dyn MailSyncBackend>,
        store: Arc<MessageStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            backend,
            store,
            sink,
            phase: Mutex::new(SyncPhase::Idle),
        }
    }

    /// Current phase, for the host's syncing indicator
    pub fn phase(&self) -> SyncPhase {
        *self.phase.lock().unwrap()
    }

    pub fn is_syncing(&self) -> bool {
        self.phase() == SyncPhase::Syncing
    }

    /// Run a sync for the given account and reload the cache on success.
    ///
    /// `account_id: None` resolves to the first available account
    /// deterministically. Rejected with a validation error when no
    /// account resolves or when another sync is already in flight.
    pub fn sync(
        &self,
        account_id: Option<&str>,
        accounts: &[EmailAccount],
        filter: &InboxFilter,
    ) -> Result<SyncOutcome, InboxError> {
        let account = match EmailAccount::resolve(account_id, accounts) {
            Some(account) => account.clone(),
            None => {
                return self.fail(InboxError::validation(match account_id {
                    Some(id) => format!("Unknown account: {}", id),
                    None => "No account available to sync".to_string(),
                }));
            }
        };

        // Global mutual exclusion: reject rather than queue.
        {
            let mut phase = self.phase.lock().unwrap();
            if *phase == SyncPhase::Syncing {
                return self.fail(InboxError::validation("A sync is already in progress"));
            }
            *phase = SyncPhase::Syncing;
        }
        let _guard = PhaseGuard { phase: &self.phase };

        info!("Syncing inbox for account {}", account.id);
        let outcome = match self.backend.sync_inbox(&account.id) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Sync failed for account {}: {}", account.id, e);
                return self.fail(e.into());
            }
        };

        if let Err(e) = reload_inbox(self.backend.as_ref(), &self.store, filter) {
            warn!("Post-sync reload failed: {}", e);
            return self.fail(e);
        }

        self.sink.notify(Notification::success(format!(
            "Synced {} emails",
            outcome.emails_processed
        )));
        Ok(outcome)
    }

    /// Surface an error as a notification and return it to the caller
    fn fail<T>(&self, error: InboxError) -> Result<T, InboxError> {
        self.sink.notify(Notification::error(error.to_string()));
        Err(error)
    }
}
