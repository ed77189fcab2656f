//! Liveness and readiness endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Readiness endpoint. Configuration is loaded before the listener binds, so
/// a serving process is always ready.
pub async fn ready() -> Json<Health> {
    Json(Health {
        status: "ready".to_string(),
    })
}
