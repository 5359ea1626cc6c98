//! Transport trait and request/response types
//!
//! Defines the `PayloadTransport` trait implemented by the HTTP transport and
//! by the in-memory mock, plus the plain value types exchanged through it.

use crate::error::{Result, TransportError};
use crate::payload::{JsonPayload, Payload};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Request specification
///
/// Describes one exchange: the method, the path relative to the transport's
/// base URL, extra headers and an optional payload.
#[derive(Debug, Clone, Default)]
pub struct PayloadRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request path, appended to the transport's base URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request payload (optional)
    pub payload: Option<Arc<dyn Payload>>,
}

impl PayloadRequest {
    /// Create a new request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            payload: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request payload
    pub fn with_payload(mut self, payload: impl Payload + 'static) -> Self {
        self.payload = Some(Arc::new(payload));
        self
    }

    /// Set a JSON payload wrapping `value`
    pub fn with_json<T>(self, value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        self.with_payload(JsonPayload::new(value))
    }
}

/// Response of an exchange
///
/// The body is kept as the raw text the peer sent; nothing is decoded until
/// [`PayloadResponse::object`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayloadResponse {
    /// HTTP status code
    pub status_code: u16,

    /// Raw response body
    pub body: String,
}

impl PayloadResponse {
    /// Create a new response
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if response is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Parse the response body as JSON
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if the body is not valid JSON or
    /// does not match the shape of `T`.
    pub fn object<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(TransportError::Decode)
    }
}

/// Abstraction over how a request is turned into a response
#[async_trait]
pub trait PayloadTransport: Send + Sync {
    /// Send a request and receive its response, whatever the status.
    async fn send(&self, request: &PayloadRequest) -> Result<PayloadResponse>;

    /// Send a request and require the response status to be one of `expected`.
    ///
    /// Any other status is turned into an error by
    /// [`TransportError::from_status`]; the error still carries the status
    /// code and body.
    async fn send_with_expected_status(
        &self,
        request: &PayloadRequest,
        expected: &[u16],
    ) -> Result<PayloadResponse> {
        let response = self.send(request).await?;
        check_status(response, expected)
    }
}

/// Accept `response` if its status is in `expected`.
pub fn check_status(response: PayloadResponse, expected: &[u16]) -> Result<PayloadResponse> {
    if expected.contains(&response.status_code) {
        return Ok(response);
    }
    Err(TransportError::from_status(
        response.status_code,
        response.body,
    ))
}
