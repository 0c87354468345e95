//! HTTP client for the mail-sync backend
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic: the host decides
//! which thread drives a request.

use super::wire::{InboxQuery, InboxResponse, SyncOutcome, SyncResponse};
use super::{BackendError, MailSyncBackend};
use crate::compose::ReplyEnvelope;
use crate::config::BackendSettings;
use crate::models::{Message, MessageId};

/// HTTP implementation of [`MailSyncBackend`]
pub struct HttpBackend {
    base_url: String,
    api_key: Option<String>,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: None,
        }
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &BackendSettings) -> Self {
        let mut client = Self::new(settings.base_url.clone());
        client.api_key = settings.api_key.clone();
        client
    }

    /// Attach a bearer token to every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Bearer {}", key))
    }

    /// Build the inbox listing query string from fetch parameters
    fn inbox_query_string(query: &InboxQuery) -> String {
        let mut params = vec![
            format!("excludeWarmup={}", query.exclude_warmup),
            format!("includeThread={}", query.include_thread),
        ];
        if let Some(account_id) = &query.account_id {
            params.push(format!("accountId={}", urlencoding::encode(account_id)));
        }
        if let Some(is_read) = query.is_read {
            params.push(format!("isRead={}", is_read));
        }
        if let Some(search) = &query.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        params.join("&")
    }

    fn map_error(e: ureq::Error, resource: &str) -> BackendError {
        match e {
            ureq::Error::StatusCode(404) => BackendError::NotFound {
                resource: resource.to_string(),
            },
            ureq::Error::StatusCode(code) => BackendError::Rejected {
                message: format!("{} failed with status {}", resource, code),
            },
            other => BackendError::Network {
                message: other.to_string(),
            },
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, BackendError> {
        let mut request = ureq::get(url);
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", &bearer);
        }

        let mut response = request.call().map_err(|e| Self::map_error(e, resource))?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| BackendError::Network {
                message: format!("Failed to parse {} response: {}", resource, e),
            })
    }

    fn post_json<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        resource: &str,
    ) -> Result<ureq::http::Response<ureq::Body>, BackendError> {
        let mut request = ureq::post(url);
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", &bearer);
        }
        request
            .send_json(body)
            .map_err(|e| Self::map_error(e, resource))
    }
}

impl MailSyncBackend for HttpBackend {
    fn get_inbox_messages(&self, query: &InboxQuery) -> Result<Vec<Message>, BackendError> {
        let url = format!(
            "{}?{}",
            self.url("/api/inbox/messages"),
            Self::inbox_query_string(query)
        );
        let response: InboxResponse = self.get_json(&url, "inbox listing")?;
        Ok(response.messages)
    }

    fn mark_as_read(&self, id: &MessageId, is_read: bool) -> Result<(), BackendError> {
        let url = self.url(&format!(
            "/api/messages/{}/read",
            urlencoding::encode(id.as_str())
        ));
        let body = serde_json::json!({ "isRead": is_read });
        self.post_json(&url, &body, &format!("message {}", id.as_str()))?;
        Ok(())
    }

    fn toggle_star(&self, id: &MessageId, is_starred: bool) -> Result<(), BackendError> {
        let url = self.url(&format!(
            "/api/messages/{}/star",
            urlencoding::encode(id.as_str())
        ));
        let body = serde_json::json!({ "isStarred": is_starred });
        self.post_json(&url, &body, &format!("message {}", id.as_str()))?;
        Ok(())
    }

    fn delete_message(&self, id: &MessageId) -> Result<(), BackendError> {
        let url = self.url(&format!(
            "/api/messages/{}",
            urlencoding::encode(id.as_str())
        ));
        let mut request = ureq::delete(&url);
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", &bearer);
        }
        request
            .call()
            .map_err(|e| Self::map_error(e, &format!("message {}", id.as_str())))?;
        Ok(())
    }

    fn sync_inbox(&self, account_id: &str) -> Result<SyncOutcome, BackendError> {
        let url = self.url("/api/inbox/sync");
        let body = serde_json::json!({ "accountId": account_id });
        let mut response =
            self.post_json(&url, &body, &format!("sync for account {}", account_id))?;
        let parsed: SyncResponse =
            response
                .body_mut()
                .read_json()
                .map_err(|e| BackendError::Network {
                    message: format!("Failed to parse sync response: {}", e),
                })?;
        Ok(parsed.result)
    }

    fn send_reply(&self, reply: &ReplyEnvelope) -> Result<(), BackendError> {
        let url = self.url("/api/messages/reply");
        self.post_json(&url, reply, "reply")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpBackend::new("http://localhost:8025/");
        assert_eq!(
            client.url("/api/inbox/sync"),
            "http://localhost:8025/api/inbox/sync"
        );
    }

    #[test]
    fn test_inbox_query_string_defaults() {
        let qs = HttpBackend::inbox_query_string(&InboxQuery::default());
        assert_eq!(qs, "excludeWarmup=true&includeThread=true");
    }

    #[test]
    fn test_inbox_query_string_with_filters() {
        let query = InboxQuery {
            account_id: Some("acc 1".to_string()),
            is_read: Some(false),
            ..InboxQuery::default()
        };
        let qs = HttpBackend::inbox_query_string(&query);
        assert!(qs.contains("accountId=acc%201"));
        assert!(qs.contains("isRead=false"));
    }

    #[test]
    fn test_status_mapping() {
        let e = HttpBackend::map_error(ureq::Error::StatusCode(404), "message m1");
        assert!(matches!(e, BackendError::NotFound { .. }));

        let e = HttpBackend::map_error(ureq::Error::StatusCode(500), "message m1");
        assert!(matches!(e, BackendError::Rejected { .. }));
    }
}
