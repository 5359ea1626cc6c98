//! Swappable transport layer for HTTP payload exchange
//!
//! Callers describe an exchange as a [`PayloadRequest`] and hand it to any
//! [`PayloadTransport`]. Production code uses [`HttpPayloadTransport`], tests
//! substitute [`MockPayloadTransport`] and assert on the requests it recorded.
//!
//! # Architecture
//!
//! - **Payloads**: JSON and multipart request bodies behind the [`Payload`] trait
//! - **Transport trait**: `send` plus a status-checking `send_with_expected_status`
//! - **HTTP transport**: real requests via reqwest
//! - **Mock transport**: canned responses and request recording
//! - **Error handling**: one error type shared by both transports
//!
//! # Usage
//!
//! ```ignore
//! use payload_transport::{Authentication, HttpPayloadTransport, PayloadRequest, PayloadTransport};
//!
//! let transport = HttpPayloadTransport::new("https://ci.example.com", Authentication::bearer("tok"))?;
//! let request = PayloadRequest::new("POST", "/rest/api/latest/deploy").with_json(deploy);
//! let response = transport.send_with_expected_status(&request, &[200, 201]).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod http;
pub mod mock;
pub mod payload;
pub mod traits;

// Re-export commonly used types
pub use auth::Authentication;
pub use error::{Result, TransportError};
pub use crate::http::{HttpPayloadTransport, HttpTransportConfig};
pub use mock::MockPayloadTransport;
pub use payload::{JsonPayload, MultipartFile, MultipartPayload, Payload};
pub use traits::{PayloadRequest, PayloadResponse, PayloadTransport, check_status};
