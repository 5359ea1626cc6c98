//! HTTP transport client implementation
//!
//! Implements the `PayloadTransport` trait over `reqwest`. Each call performs
//! exactly one exchange: no retries, no rate limiting.

use super::config::HttpTransportConfig;
use crate::auth::Authentication;
use crate::error::{Result, TransportError};
use crate::traits::{PayloadRequest, PayloadResponse, PayloadTransport};
use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

const APPLICATION_JSON: &str = "application/json";

/// HTTP transport implementation
///
/// Sends every request to `base_url + request.url`, attaching the configured
/// authentication and the payload's content headers.
#[derive(Clone)]
pub struct HttpPayloadTransport {
    client: Arc<ReqwestClient>,
    base_url: String,
    authentication: Authentication,
}

impl HttpPayloadTransport {
    /// Create a new HTTP transport for `base_url`
    pub fn new(base_url: impl Into<String>, authentication: Authentication) -> Result<Self> {
        Self::with_config(HttpTransportConfig::new(base_url).with_authentication(authentication))
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder =
            ReqwestClient::builder().default_headers(header_map(&config.default_headers)?);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url,
            authentication: config.authentication,
        })
    }

    /// Create a new HTTP transport configured from the environment
    ///
    /// See [`HttpTransportConfig::from_env`] for the variables read.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::with_config(HttpTransportConfig::from_env()?)
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> Arc<ReqwestClient> {
        self.client.clone()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authentication attached to requests
    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }
}

impl std::fmt::Debug for HttpPayloadTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPayloadTransport")
            .field("base_url", &self.base_url)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PayloadTransport for HttpPayloadTransport {
    async fn send(&self, request: &PayloadRequest) -> Result<PayloadResponse> {
        let started = Instant::now();
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let result = self.try_send_request(request).await;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(response) => tracing::info!(
                method = %request.method,
                url = %request.url,
                status = response.status_code,
                elapsed_ms,
                "HTTPX request completed"
            ),
            Err(err) => tracing::warn!(
                method = %request.method,
                url = %request.url,
                elapsed_ms,
                error = %err,
                "HTTPX request failed"
            ),
        }

        result
    }
}

impl HttpPayloadTransport {
    async fn try_send_request(&self, request: &PayloadRequest) -> Result<PayloadResponse> {
        let method = parse_method(&request.method)?;

        let target = format!("{}{}", self.base_url, request.url);
        let url = Url::parse(&target)
            .map_err(|e| TransportError::InvalidRequest(format!("invalid URL '{target}': {e}")))?;

        // Encode first: multipart content types depend on the generated boundary
        let body = request
            .payload
            .as_ref()
            .map(|payload| payload.content())
            .transpose()?;

        let mut headers = HeaderMap::new();

        if let Some(value) = self.authentication.header_value() {
            headers.insert(AUTHORIZATION, header_value(&value)?);
        }

        for (key, value) in &request.headers {
            headers.insert(header_name(key)?, header_value(value)?);
        }

        match &request.payload {
            Some(payload) => {
                headers.insert(CONTENT_TYPE, header_value(&payload.content_type())?);
                headers.insert(ACCEPT, header_value(&payload.accept())?);
            }
            None => {
                headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
            }
        }

        let mut req = self.client.request(method, url).headers(headers);

        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(PayloadResponse { status_code, body })
    }
}

/// An empty method means GET.
fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes())
        .map_err(|_| TransportError::InvalidRequest(format!("invalid HTTP method: {method:?}")))
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| TransportError::InvalidRequest(format!("invalid header name: {name:?}")))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| TransportError::InvalidRequest(format!("invalid header value: {value:?}")))
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        map.insert(header_name(key)?, header_value(value)?);
    }
    Ok(map)
}
