//! Alertmanager / VictoriaMetrics webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use notify_core::alertmanager::{render_alert, resolve_alert, AlertPost};
use tracing::{debug, info, warn};

use super::Outcome;
use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Forward each alert in the post as its own SMS.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Result<Json<Outcome>> {
    process(&state, &body).await.map(Json)
}

/// Every alert is attempted; the first send error is returned afterwards.
///
/// A partial failure still answers 500, so Alertmanager retries the whole
/// group and alerts that were already delivered are sent again.
pub async fn process(state: &AppState, body: &[u8]) -> Result<Outcome> {
    debug!("Alertmanager webhook received:\n{}", String::from_utf8_lossy(body));

    let post: AlertPost = serde_json::from_slice(body)
        .map_err(|err| GatewayError::MalformedInput(format!("invalid alert payload: {err}")))?;

    if post.alerts.is_empty() {
        info!(receiver = %post.receiver, "Alert webhook ignored (no alerts)");
        return Ok(Outcome::Ignored);
    }

    let mut receivers = Vec::with_capacity(post.alerts.len());
    let mut first_error = None;

    for alert in &post.alerts {
        let message = render_alert(alert);
        let resolution = resolve_alert(&post, alert, &state.directory);
        info!(
            alert = %alert.name(),
            receiver = %resolution.recipient.name,
            strategy = resolution.strategy,
            "Built alert message: {}",
            message
        );

        match state
            .sender
            .send_sms(&resolution.recipient.mobile, &message)
            .await
        {
            Ok(()) => {
                info!(receiver = %resolution.recipient.name, "Alert SMS sent");
                receivers.push(resolution.recipient.name);
            }
            Err(err) => {
                warn!(receiver = %resolution.recipient.name, error = %err, "Alert SMS failed");
                first_error.get_or_insert(err);
            }
        }
    }

    if let Some(err) = first_error {
        return Err(GatewayError::Send(err));
    }

    info!(sent = receivers.len(), "Alert webhook processed");
    Ok(Outcome::Forwarded { receivers })
}
