//! Error types for the webhook handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced to webhook callers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body could not be decoded.
    #[error("Malformed payload: {0}")]
    MalformedInput(String),

    /// The SMS could not be forwarded.
    #[error("Error forwarding SMS: {0}")]
    Send(#[from] forwarder::ForwarderError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::Send(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::MalformedInput(err) => {
                tracing::warn!("Malformed payload: {}", err);
            }
            GatewayError::Send(err) => {
                tracing::error!("Error sending SMS: {}", err);
            }
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Result type for webhook handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;
