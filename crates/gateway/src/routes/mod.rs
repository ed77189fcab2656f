//! Route handlers for the gateway.

pub mod alertmanager;
pub mod argocd;
pub mod health;

use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Result of handling a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing significant; no SMS was sent.
    Ignored,
    /// SMS sent to each listed receiver.
    Forwarded { receivers: Vec<String> },
}

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health::health))
        .route("/healthz", get(health::health))
        .route("/ready", get(health::ready))
        .route("/readyz", get(health::ready))
        // Alertmanager / VictoriaMetrics
        .route("/sms", post(alertmanager::webhook))
        // Argo CD notifications
        .route("/argocd", post(argocd::webhook))
        .route("/argocd/webhook", post(argocd::webhook))
        .route("/argocd/test", post(argocd::webhook))
        .route("/argocd/sync", post(argocd::sync_webhook))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    tracing::warn!(%method, path = %uri.path(), "404 Not Found");
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}
