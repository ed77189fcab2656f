//! SMS forwarding client.
//!
//! This crate provides the outbound side of the gateway: a small HTTP client
//! for an SMS API plus the [`SmsSender`] trait the webhook handlers talk to.
//!
//! # Example
//!
//! ```no_run
//! use forwarder::{SmsClient, SmsConfig, SmsSender};
//!
//! # async fn example() -> Result<(), forwarder::ForwarderError> {
//! let config = SmsConfig::new("http://127.0.0.1:9000").with_token("secret");
//! let client = SmsClient::new(config)?;
//!
//! client.send_sms("+84900000000", "[DEPLOY FAILED] | App: checkout").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sender;
pub mod types;

pub use client::SmsClient;
pub use config::SmsConfig;
pub use error::ForwarderError;
pub use sender::{LoggingSender, MemorySender, NoOpSender, SentSms, SmsSender};
pub use types::{SendRequest, SendResponse};
