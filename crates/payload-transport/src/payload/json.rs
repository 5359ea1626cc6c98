//! JSON payload

use super::Payload;
use crate::error::{Result, TransportError};
use serde::Serialize;
use std::fmt;

const APPLICATION_JSON: &str = "application/json";

/// Payload that serializes an arbitrary value as JSON
///
/// The value is type-erased and only serialized when [`Payload::content`] is
/// called, so serialization failures surface per request.
pub struct JsonPayload {
    value: Box<dyn erased_serde::Serialize + Send + Sync>,
}

impl JsonPayload {
    /// Wrap a serializable value
    pub fn new<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self {
            value: Box::new(value),
        }
    }
}

impl fmt::Debug for JsonPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonPayload").finish_non_exhaustive()
    }
}

impl Payload for JsonPayload {
    fn accept(&self) -> String {
        APPLICATION_JSON.to_string()
    }

    fn content_type(&self) -> String {
        APPLICATION_JSON.to_string()
    }

    fn content(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value).map_err(TransportError::Encode)
    }
}
