//! Error types for the SMS forwarder.

use thiserror::Error;

/// Errors that can occur when forwarding an SMS.
#[derive(Debug, Error)]
pub enum ForwarderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The SMS API answered with a non-success status.
    #[error("SMS API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The SMS API accepted the request but reported a failure.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
