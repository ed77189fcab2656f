//! Application state shared across handlers.

use std::sync::Arc;

use forwarder::SmsSender;
use notify_core::{ClassifierPolicy, RecipientDirectory};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configured recipients; read-only after startup.
    pub directory: Arc<RecipientDirectory>,
    /// Outbound SMS transport.
    pub sender: Arc<dyn SmsSender>,
    /// Policy for the main Argo CD endpoints.
    pub argocd_policy: ClassifierPolicy,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        directory: RecipientDirectory,
        sender: Arc<dyn SmsSender>,
        argocd_policy: ClassifierPolicy,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            sender,
            argocd_policy,
        }
    }
}
