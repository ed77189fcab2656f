//! Configuration for the SMS API client.

use std::time::Duration;

use secrecy::SecretString;

/// Default timeout for a single send request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the SMS API.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Base URL of the SMS API (e.g., "http://127.0.0.1:9000").
    pub base_url: String,
    /// Bearer token sent with every request, if the API requires one.
    pub api_token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SmsConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the send endpoint URL.
    pub fn send_url(&self) -> String {
        format!("{}/api/v1/sms", self.base_url.trim_end_matches('/'))
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:9000")
    }
}
