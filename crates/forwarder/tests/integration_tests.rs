//! Integration tests for the SMS forwarder.
//!
//! Tests that talk to a real SMS API are ignored by default. Run them with:
//!   SMS_API_URL=... TEST_MOBILE=... cargo test -p forwarder -- --ignored

use std::env;
use std::time::Duration;

use forwarder::{ForwarderError, SmsClient, SmsConfig, SmsSender};

mod config_tests {
    use super::*;

    #[test]
    fn test_sms_config_default() {
        let config = SmsConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.api_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_sms_config_send_url() {
        let config = SmsConfig::new("http://sms.internal:8080");
        assert_eq!(config.send_url(), "http://sms.internal:8080/api/v1/sms");

        let config = SmsConfig::new("http://sms.internal:8080/");
        assert_eq!(config.send_url(), "http://sms.internal:8080/api/v1/sms");
    }

    #[test]
    fn test_sms_config_builders() {
        let config = SmsConfig::new("http://localhost:9000")
            .with_token("secret")
            .with_timeout(Duration::from_secs(5));
        assert!(config.api_token.is_some());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_token_is_not_printed() {
        let config = SmsConfig::new("http://localhost:9000").with_token("hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}

mod send_tests {
    use super::*;

    /// Sending to a closed port surfaces an HTTP error, not a panic.
    #[tokio::test]
    async fn test_send_connection_refused() {
        let config = SmsConfig::new("http://127.0.0.1:59999").with_timeout(Duration::from_secs(2));
        let client = SmsClient::new(config).unwrap();

        let result = client.send_sms("+84900000000", "test").await;
        match result {
            Err(ForwarderError::Http(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    #[ignore = "requires SMS_API_URL and TEST_MOBILE"]
    async fn test_send_real_sms() {
        let _ = dotenvy::dotenv();
        let url = env::var("SMS_API_URL").expect("SMS_API_URL not set");
        let mobile = env::var("TEST_MOBILE").expect("TEST_MOBILE not set");

        let mut config = SmsConfig::new(url);
        if let Ok(token) = env::var("SMS_API_TOKEN") {
            config = config.with_token(token);
        }
        let client = SmsClient::new(config).unwrap();

        let result = client.send(&mobile, "Test message from forwarder integration tests").await;
        assert!(result.is_ok(), "Failed to send: {:?}", result.err());
    }
}
