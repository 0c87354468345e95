//! Reply envelope construction
//!
//! Pure helpers that turn an open message plus user-entered content into
//! the outbound reply payload. Validation of the content itself lives in
//! the mutation coordinator; this module only shapes the envelope.

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Subject marker prepended to replies
const REPLY_PREFIX: &str = "Re:";

/// Outbound reply payload sent to the mail-sync backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyEnvelope {
    /// Destination: the original sender's address
    pub to: String,
    /// Original subject with a single reply marker
    pub subject: String,
    /// User-entered reply body
    pub content: String,
    /// Protocol-level identifier of the message being replied to
    pub in_reply_to: String,
    /// Conversation identifier reused from the original, if present
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Account the reply is sent from
    pub account_id: String,
}

impl ReplyEnvelope {
    /// Build the reply envelope for an open message.
    ///
    /// The destination is the original sender, the in-reply-to reference
    /// is the original's protocol-level id, and the thread id is carried
    /// over when the original had one.
    pub fn for_message(original: &Message, content: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            to: original.from.email.clone(),
            subject: reply_subject(&original.subject),
            content: content.into(),
            in_reply_to: original.message_id.clone(),
            thread_id: original.thread_id.clone(),
            account_id: account_id.into(),
        }
    }
}

/// Derive the reply subject from the original subject.
///
/// Prepends `Re:` unless the original already starts with a reply marker
/// (case-insensitive), so repeated replies never stack prefixes.
pub fn reply_subject(original: &str) -> String {
    let trimmed = original.trim();
    let already_reply = trimmed
        .get(..REPLY_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(REPLY_PREFIX));
    if already_reply {
        trimmed.to_string()
    } else {
        format!("{} {}", REPLY_PREFIX, trimmed)
    }
}
