//! Message model representing a cached inbox entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a cached message (the client cache key)
///
/// Distinct from [`Message::message_id`], the protocol-level identifier
/// used when threading a reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An email address with optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,
    /// Email address (e.g., "john@example.com")
    pub email: String,
}

impl EmailAddress {
    /// Create a new email address with just the email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Create a new email address with a display name
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    /// Format the email address for display
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

/// A prior message in the conversation attached to an open message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEntry {
    /// Sender of the prior message
    pub from: EmailAddress,
    /// When the prior message was sent
    pub sent_at: DateTime<Utc>,
    /// Plain-text body of the prior message
    pub body: String,
    /// Whether the prior message was itself a reply
    pub is_reply: bool,
}

/// An attachment reference carried on a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// Content identifier used to retrieve the payload
    pub content_id: String,
}

/// A single inbox message as cached on the client
///
/// Everything except `is_read` and `is_starred` is a server-authoritative
/// snapshot and is never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Opaque client cache key
    pub id: MessageId,
    /// Protocol-level message identifier (used as in-reply-to)
    pub message_id: String,
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// Sender
    pub from: EmailAddress,
    /// Recipients (To field)
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    /// Plain-text body variant
    #[serde(default)]
    pub body_text: Option<String>,
    /// HTML body variant
    #[serde(default)]
    pub body_html: Option<String>,
    /// When the message was received
    pub received_at: DateTime<Utc>,
    /// Read flag (locally mutable)
    #[serde(default)]
    pub is_read: bool,
    /// Star flag (locally mutable)
    #[serde(default)]
    pub is_starred: bool,
    /// Campaign that generated this message, if it has an automated origin
    #[serde(default)]
    pub campaign_id: Option<String>,
    /// Conversation identifier, if the backend threaded this message
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Prior messages in the conversation, oldest first
    #[serde(default)]
    pub thread: Vec<ThreadEntry>,
    /// Attachment references
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Create a new message builder
    pub fn builder(id: MessageId, message_id: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(id, message_id.into())
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    id: MessageId,
    message_id: String,
    subject: String,
    from: Option<EmailAddress>,
    to: Vec<EmailAddress>,
    body_text: Option<String>,
    body_html: Option<String>,
    received_at: Option<DateTime<Utc>>,
    is_read: bool,
    is_starred: bool,
    campaign_id: Option<String>,
    thread_id: Option<String>,
    thread: Vec<ThreadEntry>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    fn new(id: MessageId, message_id: String) -> Self {
        Self {
            id,
            message_id,
            subject: String::new(),
            from: None,
            to: Vec::new(),
            body_text: None,
            body_html: None,
            received_at: None,
            is_read: false,
            is_starred: false,
            campaign_id: None,
            thread_id: None,
            thread: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn from(mut self, from: EmailAddress) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: Vec<EmailAddress>) -> Self {
        self.to = to;
        self
    }

    pub fn body_text(mut self, body: impl Into<String>) -> Self {
        self.body_text = Some(body.into());
        self
    }

    pub fn body_html(mut self, body: impl Into<String>) -> Self {
        self.body_html = Some(body.into());
        self
    }

    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = Some(received_at);
        self
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn is_starred(mut self, is_starred: bool) -> Self {
        self.is_starred = is_starred;
        self
    }

    pub fn campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    pub fn thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn thread(mut self, thread: Vec<ThreadEntry>) -> Self {
        self.thread = thread;
        self
    }

    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn build(self) -> Message {
        Message {
            id: self.id,
            message_id: self.message_id,
            subject: self.subject,
            from: self
                .from
                .unwrap_or_else(|| EmailAddress::new("unknown@unknown.com")),
            to: self.to,
            body_text: self.body_text,
            body_html: self.body_html,
            received_at: self.received_at.unwrap_or_else(Utc::now),
            is_read: self.is_read,
            is_starred: self.is_starred,
            campaign_id: self.campaign_id,
            thread_id: self.thread_id,
            thread: self.thread,
            attachments: self.attachments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let msg = Message::builder(MessageId::new("a"), "proto-a").build();
        assert_eq!(msg.id.as_str(), "a");
        assert_eq!(msg.message_id, "proto-a");
        assert!(!msg.is_read);
        assert!(!msg.is_starred);
        assert!(msg.thread_id.is_none());
        assert!(msg.thread.is_empty());
    }

    #[test]
    fn test_display_with_name() {
        let addr = EmailAddress::with_name("John Doe", "john@example.com");
        assert_eq!(addr.display(), "John Doe <john@example.com>");
    }

    #[test]
    fn test_display_without_name() {
        let addr = EmailAddress::new("john@example.com");
        assert_eq!(addr.display(), "john@example.com");
    }

    #[test]
    fn test_wire_roundtrip_uses_camel_case() {
        let msg = Message::builder(MessageId::new("a"), "proto-a")
            .subject("Hello")
            .from(EmailAddress::new("x@y.com"))
            .is_read(true)
            .thread_id("t1")
            .build();

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"messageId\":\"proto-a\""));
        assert!(json.contains("\"isRead\":true"));
        assert!(json.contains("\"threadId\":\"t1\""));
    }

    #[test]
    fn test_deserialize_tolerates_missing_optionals() {
        let json = r#"{
            "id": "a",
            "messageId": "proto-a",
            "from": {"name": null, "email": "x@y.com"},
            "receivedAt": "2026-01-15T10:00:00Z"
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.subject, "");
        assert!(msg.body_text.is_none());
        assert!(msg.attachments.is_empty());
        assert!(!msg.is_read);
    }
}
