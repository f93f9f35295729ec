//! Configuration types for the SOAP client facade.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds, applied to both the WSDL fetch and
/// operation calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
///
/// The WSDL URL is the only required field. Credentials are all-or-nothing:
/// HTTP basic authentication is attached only when both username and
/// password are present, which [`Credentials`] enforces structurally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the WSDL document describing the service
    pub wsdl_url: String,

    /// Optional HTTP basic authentication credentials
    pub credentials: Option<Credentials>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wsdl_url: String::new(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given WSDL URL with default timeout
    /// and no authentication.
    pub fn new(wsdl_url: impl Into<String>) -> Self {
        Self {
            wsdl_url: wsdl_url.into(),
            ..Default::default()
        }
    }

    /// Attach HTTP basic authentication. Both values are required.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP basic authentication credentials.
///
/// Requires both fields, so a username without a password (or vice versa)
/// is unrepresentable rather than silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}
