//! Error types for the CareerPath client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success status on a read
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A mutation was declined by the server
    #[error("Request rejected ({status}): {}", .reason.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, reason: Option<String> },

    /// Form input failed validation before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Server-supplied reason for a rejected mutation, if any
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reason() {
        let err = ClientError::Rejected {
            status: 400,
            reason: Some("Progress already exists for this course".into()),
        };
        assert_eq!(
            err.rejection_reason(),
            Some("Progress already exists for this course")
        );

        let err = ClientError::Rejected { status: 500, reason: None };
        assert_eq!(err.rejection_reason(), None);
        assert!(err.to_string().contains("no reason given"));
    }
}
