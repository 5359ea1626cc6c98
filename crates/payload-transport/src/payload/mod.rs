//! Request payloads
//!
//! A payload knows how to serialize itself and which `Accept` and
//! `Content-Type` headers go with it. Two kinds exist: [`JsonPayload`] and
//! [`MultipartPayload`].

pub mod json;
pub mod multipart;

pub use json::JsonPayload;
pub use multipart::{MultipartFile, MultipartPayload};

use crate::error::Result;
use std::fmt::Debug;

/// Content-bearing part of a request
pub trait Payload: Debug + Send + Sync {
    /// Value for the `Accept` header.
    fn accept(&self) -> String;

    /// Value for the `Content-Type` header.
    ///
    /// Transports read this after [`Payload::content`], so payloads whose
    /// content type depends on the encoding (multipart boundaries) report the
    /// value matching the most recent body. Do not encode one payload instance
    /// from two tasks at once: the reported value may then belong to the other
    /// task's body.
    fn content_type(&self) -> String;

    /// Serialize the payload into a request body.
    fn content(&self) -> Result<Vec<u8>>;

    /// Serialize the payload, aborting if that fails.
    ///
    /// Only for call sites that already know the payload is serializable.
    ///
    /// # Panics
    ///
    /// Panics if [`Payload::content`] returns an error.
    fn content_must(&self) -> Vec<u8> {
        match self.content() {
            Ok(content) => content,
            Err(err) => panic!("payload content could not be produced: {err}"),
        }
    }
}
