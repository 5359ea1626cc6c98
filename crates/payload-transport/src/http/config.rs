//! Configuration for the HTTP transport

use crate::auth::Authentication;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP transport configuration
///
/// No timeout is applied unless one is set; connection reuse is left to the
/// underlying client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransportConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Credentials sent with every request
    pub authentication: Authentication,

    /// Total request timeout
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Option<Duration>,

    /// Headers sent with every request unless the request sets them itself
    pub default_headers: HashMap<String, String>,
}

impl HttpTransportConfig {
    /// Create a configuration for `base_url` with no authentication.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the authentication.
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = authentication;
        self
    }

    /// Set the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if present. This will look for:
    /// - `PAYLOAD_TRANSPORT_BASE_URL` for the base URL (required)
    /// - `PAYLOAD_TRANSPORT_TOKEN` for bearer authentication, or
    ///   `PAYLOAD_TRANSPORT_USERNAME` and `PAYLOAD_TRANSPORT_PASSWORD` for
    ///   basic authentication
    /// - `PAYLOAD_TRANSPORT_TIMEOUT` for the request timeout (in seconds, must be a valid u64)
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`](crate::TransportError::Config) if the
    /// base URL is missing or the timeout is not a number.
    #[cfg(feature = "env")]
    pub fn from_env() -> crate::error::Result<Self> {
        use crate::error::TransportError;
        use std::env;

        let _ = dotenvy::dotenv();

        let base_url = env::var("PAYLOAD_TRANSPORT_BASE_URL").map_err(|_| {
            TransportError::Config("PAYLOAD_TRANSPORT_BASE_URL is not set".to_string())
        })?;
        let mut config = Self::new(base_url);

        // Authentication
        if let Ok(token) = env::var("PAYLOAD_TRANSPORT_TOKEN") {
            config.authentication = Authentication::bearer(token);
        } else if let Ok(username) = env::var("PAYLOAD_TRANSPORT_USERNAME") {
            let password = env::var("PAYLOAD_TRANSPORT_PASSWORD").unwrap_or_default();
            config.authentication = Authentication::basic(username, password);
        }

        // Timeout - return error if invalid
        if let Ok(timeout_str) = env::var("PAYLOAD_TRANSPORT_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                TransportError::Config(format!(
                    "PAYLOAD_TRANSPORT_TIMEOUT must be a valid number of seconds, got: '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Some(Duration::from_secs(timeout_secs));
        }

        Ok(config)
    }
}
