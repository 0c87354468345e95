//! Wire types for the mail-sync HTTP API
//!
//! All request and response bodies are JSON with camelCase field names.

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Fetch parameters for the inbox listing
///
/// Account and read-state filters are applied server-side. The backend
/// also accepts a `search` term, but the core leaves it unset and filters
/// text client-side so the cached projection stays complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxQuery {
    /// Restrict to a single account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Restrict by read state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    /// Server-side search term (unused by this client)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Drop automated warmup traffic from the listing
    pub exclude_warmup: bool,
    /// Attach prior conversation messages to each entry
    pub include_thread: bool,
}

impl Default for InboxQuery {
    fn default() -> Self {
        Self {
            account_id: None,
            is_read: None,
            search: None,
            exclude_warmup: true,
            include_thread: true,
        }
    }
}

/// Response envelope for the inbox listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Result payload of a completed sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    /// How many emails the backend processed during this sync
    pub emails_processed: u64,
}

/// Response envelope for a sync request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub result: SyncOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = InboxQuery::default();
        assert!(query.account_id.is_none());
        assert!(query.is_read.is_none());
        assert!(query.exclude_warmup);
        assert!(query.include_thread);
    }

    #[test]
    fn test_query_skips_unset_filters() {
        let json = serde_json::to_string(&InboxQuery::default()).unwrap();
        assert!(!json.contains("accountId"));
        assert!(!json.contains("isRead"));
        assert!(json.contains("\"excludeWarmup\":true"));
    }

    #[test]
    fn test_sync_response_parses() {
        let json = r#"{"result":{"emailsProcessed":12}}"#;
        let response: SyncResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result.emails_processed, 12);
    }

    #[test]
    fn test_inbox_response_tolerates_missing_messages() {
        let response: InboxResponse = serde_json::from_str("{}").unwrap();
        assert!(response.messages.is_empty());
    }
}
