//! Wire types for the SMS API.

use serde::{Deserialize, Serialize};

/// Body of a send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    /// Destination mobile number.
    pub to: String,
    /// Message text.
    pub message: String,
}

impl SendRequest {
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
        }
    }
}

/// Response from the SMS API.
///
/// APIs that answer with an empty body or plain text are treated as success
/// as long as the HTTP status is 2xx.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    /// Whether the provider accepted the message.
    #[serde(default = "accepted")]
    pub success: bool,

    /// Provider message id, if returned.
    #[serde(default)]
    pub message_id: Option<String>,

    /// Error detail when `success` is false.
    #[serde(default)]
    pub error: Option<String>,
}

fn accepted() -> bool {
    true
}
