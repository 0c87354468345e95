//! Visible-subset derivation for the cached inbox
//!
//! Account and read-state filters are fetch parameters resolved
//! server-side; only the free-text search runs against the cache. The
//! search is a case-insensitive substring match over subject, sender
//! email, and plain-text body — HTML bodies are never searched. Filtering
//! subsets the cache, it never reorders it.

use crate::backend::InboxQuery;
use crate::models::Message;

/// Active inbox filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboxFilter {
    /// Restrict to one account (server-side)
    pub account_id: Option<String>,
    /// Restrict by read state (server-side)
    pub is_read: Option<bool>,
    /// Free-text search (client-side)
    pub search: String,
}

impl InboxFilter {
    /// Fetch parameters for the server-side portion of this filter
    pub fn to_query(&self) -> InboxQuery {
        InboxQuery {
            account_id: self.account_id.clone(),
            is_read: self.is_read,
            ..InboxQuery::default()
        }
    }

    /// Derive the visible subset of the cache.
    ///
    /// Pure and idempotent; an empty search term is the identity.
    pub fn apply(&self, messages: &[Message]) -> Vec<Message> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return messages.to_vec();
        }

        messages
            .iter()
            .filter(|m| matches_search(m, &needle))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match against the searchable fields.
///
/// Missing fields count as empty strings so sparse messages never fail
/// the filter with an error.
fn matches_search(message: &Message, needle: &str) -> bool {
    let subject = message.subject.to_lowercase();
    let sender = message.from.email.to_lowercase();
    let body = message
        .body_text
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    subject.contains(needle) || sender.contains(needle) || body.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailAddress, MessageId};

    fn make_message(id: &str, subject: &str, sender: &str, body: Option<&str>) -> Message {
        let mut builder = Message::builder(MessageId::new(id), format!("proto-{}", id))
            .subject(subject)
            .from(EmailAddress::new(sender));
        if let Some(body) = body {
            builder = builder.body_text(body);
        }
        builder.build()
    }

    fn sample() -> Vec<Message> {
        vec![
            make_message("a", "Quarterly report", "alice@corp.com", Some("numbers attached")),
            make_message("b", "Lunch?", "bob@corp.com", Some("pizza on friday")),
            make_message("c", "", "carol@other.org", None),
        ]
    }

    #[test]
    fn test_empty_search_is_identity() {
        let filter = InboxFilter::default();
        let messages = sample();
        let visible = filter.apply(&messages);
        assert_eq!(visible.len(), messages.len());
        assert_eq!(visible[0].id, messages[0].id);
        assert_eq!(visible[2].id, messages[2].id);
    }

    #[test]
    fn test_whitespace_search_is_identity() {
        let filter = InboxFilter {
            search: "   ".to_string(),
            ..InboxFilter::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_search_matches_subject_case_insensitive() {
        let filter = InboxFilter {
            search: "QUARTERLY".to_string(),
            ..InboxFilter::default()
        };
        let visible = filter.apply(&sample());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "a");
    }

    #[test]
    fn test_search_matches_sender_email() {
        let filter = InboxFilter {
            search: "bob@".to_string(),
            ..InboxFilter::default()
        };
        let visible = filter.apply(&sample());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "b");
    }

    #[test]
    fn test_search_matches_plain_text_body() {
        let filter = InboxFilter {
            search: "pizza".to_string(),
            ..InboxFilter::default()
        };
        let visible = filter.apply(&sample());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "b");
    }

    #[test]
    fn test_search_tolerates_missing_fields() {
        let filter = InboxFilter {
            search: "anything".to_string(),
            ..InboxFilter::default()
        };
        // Message "c" has no subject and no body; it must simply not match
        let visible = filter.apply(&sample());
        assert!(visible.iter().all(|m| m.id.as_str() != "c"));
    }

    #[test]
    fn test_html_body_is_not_searched() {
        let mut message = make_message("h", "plain", "h@x.com", None);
        message.body_html = Some("<p>hidden treasure</p>".to_string());
        let filter = InboxFilter {
            search: "treasure".to_string(),
            ..InboxFilter::default()
        };
        assert!(filter.apply(&[message]).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let filter = InboxFilter {
            search: "corp.com".to_string(),
            ..InboxFilter::default()
        };
        let once = filter.apply(&sample());
        let twice = filter.apply(&once);
        assert_eq!(once.len(), twice.len());
        assert!(once.iter().zip(&twice).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_filtering_preserves_order() {
        let filter = InboxFilter {
            search: "corp.com".to_string(),
            ..InboxFilter::default()
        };
        let visible = filter.apply(&sample());
        assert_eq!(visible[0].id.as_str(), "a");
        assert_eq!(visible[1].id.as_str(), "b");
    }

    #[test]
    fn test_to_query_carries_server_side_filters() {
        let filter = InboxFilter {
            account_id: Some("acc-1".to_string()),
            is_read: Some(false),
            search: "pizza".to_string(),
        };
        let query = filter.to_query();
        assert_eq!(query.account_id.as_deref(), Some("acc-1"));
        assert_eq!(query.is_read, Some(false));
        // Text search stays client-side
        assert!(query.search.is_none());
    }
}
