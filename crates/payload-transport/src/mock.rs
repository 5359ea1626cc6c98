//! In-memory mock transport
//!
//! Resolves requests from a table of canned responses instead of the network
//! and records every request it answers, so tests can assert which endpoints
//! were called and with what.
//!
//! Responses are keyed either by bare path (`"/deploy"`, any method) or by
//! `"<METHOD>:<path>"` (`"POST:/deploy"`). The bare path is tried first, so a
//! method-agnostic entry shadows a method-specific one for the same path.

use crate::error::{Result, TransportError};
use crate::traits::{PayloadRequest, PayloadResponse, PayloadTransport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mock of [`PayloadTransport`] that answers from memory
#[derive(Debug, Default)]
pub struct MockPayloadTransport {
    payloads: HashMap<String, PayloadResponse>,
    requests: Mutex<HashMap<String, Vec<PayloadRequest>>>,
}

impl MockPayloadTransport {
    /// Create a mock with no canned responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response under `key`
    pub fn with_response(mut self, key: impl Into<String>, response: PayloadResponse) -> Self {
        self.insert(key, response);
        self
    }

    /// Register a canned response under `key`, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, response: PayloadResponse) {
        self.payloads.insert(key.into(), response);
    }

    /// Requests recorded under `"<METHOD>:<path>"`, oldest first
    pub fn requests(&self, key: &str) -> Vec<PayloadRequest> {
        self.recorded().get(key).cloned().unwrap_or_default()
    }

    /// Number of requests recorded under `"<METHOD>:<path>"`
    pub fn request_count(&self, key: &str) -> usize {
        self.recorded().get(key).map_or(0, Vec::len)
    }

    /// Keys that have at least one recorded request
    pub fn recorded_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.recorded().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Forget every recorded request
    pub fn clear_requests(&self) {
        self.recorded().clear();
    }

    fn recorded(&self) -> MutexGuard<'_, HashMap<String, Vec<PayloadRequest>>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, request: &PayloadRequest, key: &str) -> Option<&PayloadResponse> {
        self.payloads
            .get(&request.url)
            .or_else(|| self.payloads.get(key))
    }
}

#[async_trait]
impl PayloadTransport for MockPayloadTransport {
    async fn send(&self, request: &PayloadRequest) -> Result<PayloadResponse> {
        let key = format!("{}:{}", request.method, request.url);

        let Some(response) = self.lookup(request, &key).cloned() else {
            tracing::debug!(method = %request.method, url = %request.url, "No canned response");
            return Err(TransportError::NotFound {
                method: request.method.clone(),
                path: request.url.clone(),
            });
        };

        self.recorded().entry(key).or_default().push(request.clone());
        Ok(response)
    }
}
