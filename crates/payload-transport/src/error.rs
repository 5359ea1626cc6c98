//! Transport error types
//!
//! A single error enum covers both the HTTP and the mock transport so callers
//! can match on failures without knowing which transport produced them.

use crate::traits::PayloadResponse;
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// A JSON payload could not be serialized.
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A multipart payload could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response body could not be decoded into the requested type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response status was not among the expected ones.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response status was an unexpected client error (4xx).
    #[error("Bad request (status {status}): {body}")]
    BadRequest {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The mock transport has no canned response for the request.
    #[error("No payload for endpoint {method}:{path}")]
    NotFound {
        /// Request method
        method: String,
        /// Request path
        path: String,
    },

    /// The request could not be turned into a valid HTTP request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport configuration is missing or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TransportError {
    /// Map a status that the caller did not expect to an error.
    ///
    /// Client errors (4xx) become [`TransportError::BadRequest`]; every other
    /// status becomes [`TransportError::UnexpectedStatus`]. Both keep the
    /// status code and body so the response can be recovered.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400..=499 => Self::BadRequest { status, body },
            _ => Self::UnexpectedStatus { status, body },
        }
    }

    /// Status code carried by a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } | Self::BadRequest { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Response body carried by a status error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { body, .. } | Self::BadRequest { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Rebuild the response that triggered a status error.
    ///
    /// Lets callers inspect partial results after
    /// [`send_with_expected_status`](crate::PayloadTransport::send_with_expected_status)
    /// rejected the status.
    pub fn response(&self) -> Option<PayloadResponse> {
        match self {
            Self::UnexpectedStatus { status, body } | Self::BadRequest { status, body } => {
                Some(PayloadResponse::new(*status, body.clone()))
            }
            _ => None,
        }
    }

    /// Check if this is a client error status (4xx)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
