//! Error taxonomy for coordinator operations
//!
//! Every failure a coordinator can surface falls into one of four buckets:
//! bad local input, transport failure, a missing server-side resource, or
//! an explicit backend rejection. Coordinators convert all of these into
//! notifications as well, so the host never has to crash on them.

use crate::backend::BackendError;

/// Error type returned by coordinator operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum InboxError {
    /// Bad or missing local input (empty reply body, no account available)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The request could not complete
    #[error("Network error: {message}")]
    Network { message: String },

    /// The target no longer exists server-side (or locally)
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The request completed but the backend signaled failure
    #[error("Server error: {message}")]
    Server { message: String },
}

impl InboxError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<BackendError> for InboxError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Network { message } => InboxError::Network { message },
            BackendError::NotFound { resource } => InboxError::NotFound { resource },
            BackendError::Rejected { message } => InboxError::Server { message },
        }
    }
}
