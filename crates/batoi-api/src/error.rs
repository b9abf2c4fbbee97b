//! # Client Error Types
//!
//! Failures talking to the remote books service.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidUrl     │  │  Network        │  │  Status (non-2xx)       │ │
//! │  │                 │  │  Timeout        │  │  Decode (bad JSON)      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stores treat every variant as opaque and only keep its message.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Remote service failure.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Base URL cannot be used to build endpoints.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Connection refused, DNS failure, reset...
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// True when the record addressed by the request does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClientError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server responded 500: boom");
        assert_eq!(ClientError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_is_not_found() {
        let missing = ClientError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(missing.is_not_found());
        assert!(!ClientError::Timeout.is_not_found());
    }

    #[test]
    fn test_url_parse_error_converts() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
