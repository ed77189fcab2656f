//! HTTP client for the SMS API.

use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::config::SmsConfig;
use crate::error::ForwarderError;
use crate::types::{SendRequest, SendResponse};

/// Client for the SMS API.
///
/// Sends are single attempts: a failed request is reported to the caller and
/// never retried here.
#[derive(Clone)]
pub struct SmsClient {
    http: Client,
    config: SmsConfig,
}

impl SmsClient {
    /// Build a client from configuration.
    pub fn new(config: SmsConfig) -> Result<Self, ForwarderError> {
        if config.base_url.trim().is_empty() {
            return Err(ForwarderError::Config("SMS API base URL is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ForwarderError::Http)?;

        info!("SMS client configured for {}", config.base_url);
        Ok(Self { http, config })
    }

    /// Send a text message to a mobile number.
    pub async fn send(&self, to: &str, message: &str) -> Result<SendResponse, ForwarderError> {
        let url = self.config.send_url();
        let body = SendRequest::new(to, message);

        debug!(to = %to, len = message.chars().count(), "POST {}", url);

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(ForwarderError::Http)?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ForwarderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let result = parse_response(&text);
        if !result.success {
            return Err(ForwarderError::SendFailed(
                result.error.unwrap_or_else(|| "rejected by provider".to_string()),
            ));
        }
        Ok(result)
    }

    /// Get the configuration.
    pub fn config(&self) -> &SmsConfig {
        &self.config
    }
}

/// Interpret a 2xx response body. Empty and non-JSON bodies count as accepted.
fn parse_response(text: &str) -> SendResponse {
    serde_json::from_str(text).unwrap_or(SendResponse {
        success: true,
        message_id: None,
        error: None,
    })
}

impl std::fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        assert!(parse_response("").success);
        assert!(parse_response("OK").success);
        assert!(!parse_response(r#"{"success": false}"#).success);
        assert_eq!(
            parse_response(r#"{"messageId": "abc"}"#).message_id.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_new_rejects_empty_url() {
        let result = SmsClient::new(SmsConfig::new("  "));
        assert!(matches!(result, Err(ForwarderError::Config(_))));
    }
}
