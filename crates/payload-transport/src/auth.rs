//! Request authentication

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

/// Credentials attached to every request sent by a transport
#[derive(Debug, Clone, Default)]
pub enum Authentication {
    /// No `Authorization` header
    #[default]
    None,

    /// HTTP basic authentication
    Basic {
        /// User name
        username: String,
        /// Password
        password: SecretString,
    },

    /// Bearer token authentication
    Bearer {
        /// Token value
        token: SecretString,
    },
}

impl Authentication {
    /// Basic credentials from a username and password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// Bearer credentials from a token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::new(token.into().into_boxed_str()),
        }
    }

    /// Value of the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password.expose_secret());
                Some(format!("Basic {}", STANDARD.encode(credentials)))
            }
            Self::Bearer { token } => Some(format!("Bearer {}", token.expose_secret())),
        }
    }
}
