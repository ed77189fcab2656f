//! Argo CD notification webhooks.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use notify_core::{ClassifierPolicy, NotificationRecord};
use tracing::{debug, info};

use super::Outcome;
use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Webhook using the configured policy.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Result<Json<Outcome>> {
    let policy = state.argocd_policy;
    process(&state, policy, &body).await.map(Json)
}

/// Webhook for the sync-status feed.
pub async fn sync_webhook(State(state): State<AppState>, body: Bytes) -> Result<Json<Outcome>> {
    process(&state, ClassifierPolicy::SyncOnly, &body).await.map(Json)
}

/// Decode, classify, render, resolve and forward one notification.
pub async fn process(state: &AppState, policy: ClassifierPolicy, body: &[u8]) -> Result<Outcome> {
    debug!("Argo CD webhook received:\n{}", String::from_utf8_lossy(body));

    let record = NotificationRecord::from_slice(body)
        .map_err(|err| GatewayError::MalformedInput(format!("invalid Argo CD notification: {err}")))?;

    let Some(dispatch) = notify_core::evaluate(policy, &record, &state.directory) else {
        info!(
            app = %record.app_name(),
            %policy,
            "Argo CD notification ignored (no significant event)"
        );
        return Ok(Outcome::Ignored);
    };

    info!(alert_type = %dispatch.alert_type, "Built Argo CD message: {}", dispatch.message);
    info!(
        receiver = %dispatch.recipient.name,
        strategy = dispatch.strategy,
        "Target receiver"
    );

    state
        .sender
        .send_sms(&dispatch.recipient.mobile, &dispatch.message)
        .await?;

    info!(receiver = %dispatch.recipient.name, "Argo CD SMS sent");
    Ok(Outcome::Forwarded {
        receivers: vec![dispatch.recipient.name],
    })
}
