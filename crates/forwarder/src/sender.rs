//! SMS sender trait and implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::SmsClient;
use crate::error::ForwarderError;

/// Trait for delivering a rendered message to a mobile number.
///
/// Abstracted so the webhook handlers can run against the real SMS API,
/// a logger, or an in-memory recorder in tests.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send `message` to `mobile`.
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), ForwarderError>;

    /// Get a human-readable name for this sender.
    fn name(&self) -> &str;
}

#[async_trait]
impl SmsSender for SmsClient {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), ForwarderError> {
        let response = self.send(mobile, message).await?;
        if let Some(id) = response.message_id {
            tracing::debug!(mobile = %mobile, message_id = %id, "SMS accepted");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "sms-api"
    }
}

/// A no-op sender that discards all messages.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl SmsSender for NoOpSender {
    async fn send_sms(&self, _mobile: &str, _message: &str) -> Result<(), ForwarderError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// A sender that only logs what it would send.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl SmsSender for LoggingSender {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), ForwarderError> {
        tracing::info!(mobile = %mobile, "SMS (dry run): {}", message);
        Ok(())
    }

    fn name(&self) -> &str {
        "logging"
    }
}

/// A message captured by [`MemorySender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub mobile: String,
    pub message: String,
}

/// Records every message in memory. Can be told to fail every send.
#[derive(Debug, Clone, Default)]
pub struct MemorySender {
    sent: Arc<Mutex<Vec<SentSms>>>,
    fail: bool,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every send fails with [`ForwarderError::SendFailed`].
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages sent so far.
    pub async fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl SmsSender for MemorySender {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), ForwarderError> {
        if self.fail {
            return Err(ForwarderError::SendFailed("provider unavailable".to_string()));
        }
        self.sent.lock().await.push(SentSms {
            mobile: mobile.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_sender() {
        let sender = NoOpSender;
        sender.send_sms("+84900000000", "test").await.unwrap();
        assert_eq!(sender.name(), "noop");
    }

    #[tokio::test]
    async fn test_logging_sender() {
        let sender = LoggingSender;
        sender.send_sms("+84900000000", "test").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_sender_records() {
        let sender = MemorySender::new();
        let shared: Arc<dyn SmsSender> = Arc::new(sender.clone());

        shared.send_sms("+1", "first").await.unwrap();
        shared.send_sms("+2", "second").await.unwrap();

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], SentSms { mobile: "+2".into(), message: "second".into() });
    }

    #[tokio::test]
    async fn test_memory_sender_failing() {
        let sender = MemorySender::failing();
        let err = sender.send_sms("+1", "lost").await.unwrap_err();
        assert!(matches!(err, ForwarderError::SendFailed(_)));
        assert!(sender.sent().await.is_empty());
    }
}
