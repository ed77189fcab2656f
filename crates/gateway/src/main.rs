//! Webhook-to-SMS gateway.
//!
//! Receives Argo CD notifications and Alertmanager alerts over HTTP, decides
//! which ones matter, and forwards a short text to the right on-call number.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use forwarder::{LoggingSender, NoOpSender, SmsClient, SmsSender};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Delivery, ReceiversFile};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        version = notify_core::version(),
        policy = %config.argocd_policy,
        "Starting SMS gateway"
    );

    let directory = ReceiversFile::load(&config.receivers_path)?.into_directory()?;
    info!(
        receivers = directory.recipients().len(),
        project_routes = directory.project_routes().len(),
        path = %config.receivers_path.display(),
        "Loaded receivers"
    );

    let sender: Arc<dyn SmsSender> = match config.delivery {
        Delivery::Send => {
            let client = SmsClient::new(config.sms_config())?;
            info!(url = %client.config().send_url(), "SMS API endpoint");
            Arc::new(client)
        }
        Delivery::DryRun => Arc::new(LoggingSender),
        Delivery::Discard => Arc::new(NoOpSender),
    };
    info!(sender = sender.name(), "SMS sender ready");

    // Build application state
    let state = AppState::new(directory, sender, config.argocd_policy);

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "SMS gateway listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
