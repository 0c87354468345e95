//! Deferred-reload timing utilities
//!
//! Pure functions that can be tested without a host event loop.
//!
//! A sent reply is not guaranteed to be visible in the backend's inbox
//! synchronously, so the mutation coordinator schedules a reload for a
//! short, bounded delay instead of refetching immediately. The core never
//! sleeps; the host polls [`PendingReload::is_due`] from its own loop.

use chrono::{DateTime, Duration, Utc};

/// Seconds to wait before refetching the inbox after a sent reply
pub const REPLY_RELOAD_DELAY_SECS: i64 = 2;

/// A scheduled cache reload with an absolute due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReload {
    pub due_at: DateTime<Utc>,
}

impl PendingReload {
    /// Schedule a reload `secs` seconds from now
    pub fn after_secs(secs: i64) -> Self {
        Self {
            due_at: Utc::now() + Duration::seconds(secs),
        }
    }

    /// Schedule a reload with the default post-reply delay
    pub fn after_reply() -> Self {
        Self::after_secs(REPLY_RELOAD_DELAY_SECS)
    }

    /// Check whether the reload should run at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let pending = PendingReload::after_secs(30);
        assert!(!pending.is_due(Utc::now()));
        assert!(!pending.is_due(Utc::now() + Duration::seconds(10)));
    }

    #[test]
    fn test_due_after_delay() {
        let pending = PendingReload::after_secs(30);
        assert!(pending.is_due(Utc::now() + Duration::seconds(31)));
        assert!(pending.is_due(Utc::now() + Duration::hours(1)));
    }

    #[test]
    fn test_zero_delay_is_immediately_due() {
        let pending = PendingReload::after_secs(0);
        assert!(pending.is_due(Utc::now()));
    }

    #[test]
    fn test_after_reply_uses_bounded_delay() {
        let pending = PendingReload::after_reply();
        let now = Utc::now();
        assert!(!pending.is_due(now));
        assert!(pending.is_due(now + Duration::seconds(REPLY_RELOAD_DELAY_SECS + 1)));
    }
}
