//! Outbound user-facing notifications
//!
//! The core never renders toasts itself. It emits (severity, message)
//! pairs through a host-provided sink and moves on.

use std::sync::RwLock;

/// How the host should present a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A single user-facing notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Host-provided sink for user-facing notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that routes notifications to the log facade
///
/// Useful for headless hosts and as a default while wiring up a UI.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => log::error!("{}", notification.message),
            Severity::Success | Severity::Info => log::info!("{}", notification.message),
        }
    }
}

/// Sink that captures notifications in memory
///
/// Used by tests to assert on what was surfaced.
#[derive(Default)]
pub struct MemorySink {
    captured: RwLock<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far, oldest first
    pub fn captured(&self) -> Vec<Notification> {
        self.captured.read().unwrap().clone()
    }

    /// Messages of all captured errors, oldest first
    pub fn errors(&self) -> Vec<String> {
        self.captured
            .read()
            .unwrap()
            .iter()
            .filter(|n| n.severity == Severity::Error)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.captured.write().unwrap().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.notify(Notification::info("first"));
        sink.notify(Notification::error("second"));

        let captured = sink.captured();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].message, "first");
        assert_eq!(captured[1].severity, Severity::Error);
    }

    #[test]
    fn test_memory_sink_errors_only() {
        let sink = MemorySink::new();
        sink.notify(Notification::success("saved"));
        sink.notify(Notification::error("boom"));

        assert_eq!(sink.errors(), vec!["boom".to_string()]);
    }
}
