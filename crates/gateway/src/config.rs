//! Configuration loaded from environment variables and the receivers file.

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use forwarder::SmsConfig;
use notify_core::{ClassifierPolicy, ProjectRoutes, Recipient, RecipientDirectory};
use serde::Deserialize;
use tracing::warn;

/// How outbound messages are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Post to the SMS API.
    #[default]
    Send,
    /// Log each message instead of sending it.
    DryRun,
    /// Drop messages silently.
    Discard,
}

impl Delivery {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Delivery::DryRun,
            "noop" => Delivery::Discard,
            _ => Delivery::Send,
        }
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Path to the JSON receivers file.
    pub receivers_path: PathBuf,
    /// Classifier policy for the main Argo CD endpoints.
    pub argocd_policy: ClassifierPolicy,
    /// SMS API base URL.
    pub sms_api_url: String,
    /// Optional SMS API bearer token.
    pub sms_api_token: Option<String>,
    /// SMS API request timeout.
    pub sms_timeout: Duration,
    pub delivery: Delivery,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GATEWAY_ADDR` | Server bind address | `0.0.0.0:8080` |
    /// | `GATEWAY_CONFIG` | Receivers file | `config.json` |
    /// | `ARGOCD_POLICY` | `broad` or `sync-only` | `broad` |
    /// | `SMS_API_URL` | SMS API base URL | `http://127.0.0.1:9000` |
    /// | `SMS_API_TOKEN` | SMS API bearer token | (none) |
    /// | `SMS_TIMEOUT_SECS` | SMS API timeout | `30` |
    /// | `SMS_DRY_RUN` | `true` logs instead of sending, `noop` discards | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("GATEWAY_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let receivers_path = lookup("GATEWAY_CONFIG")
            .unwrap_or_else(|| "config.json".to_string())
            .into();

        let argocd_policy = match lookup("ARGOCD_POLICY") {
            Some(value) => value
                .parse::<ClassifierPolicy>()
                .map_err(|e| ConfigError::InvalidPolicy(e.0))?,
            None => ClassifierPolicy::default(),
        };

        let sms_api_url =
            lookup("SMS_API_URL").unwrap_or_else(|| "http://127.0.0.1:9000".to_string());

        let sms_api_token = lookup("SMS_API_TOKEN").filter(|token| !token.trim().is_empty());

        let sms_timeout = lookup("SMS_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let delivery = lookup("SMS_DRY_RUN")
            .map(|v| Delivery::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            addr,
            receivers_path,
            argocd_policy,
            sms_api_url,
            sms_api_token,
            sms_timeout,
            delivery,
        })
    }

    /// SMS client configuration derived from this config.
    pub fn sms_config(&self) -> SmsConfig {
        let config = SmsConfig::new(&self.sms_api_url).with_timeout(self.sms_timeout);
        match &self.sms_api_token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

/// The receivers file.
///
/// ```json
/// {
///   "receiver": [{"name": "alert-devops", "mobile": "+84900000001"}],
///   "default_receiver": {"mobile": "+84900000000"},
///   "project_receivers": {"payments": "alert-payments"}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiversFile {
    #[serde(default)]
    pub receiver: Vec<Recipient>,
    pub default_receiver: DefaultReceiver,
    /// Replaces the built-in project table when present.
    #[serde(default)]
    pub project_receivers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultReceiver {
    pub mobile: String,
}

impl ReceiversFile {
    /// Read and parse the receivers file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and build the recipient directory.
    pub fn into_directory(self) -> Result<RecipientDirectory, ConfigError> {
        if self.default_receiver.mobile.trim().is_empty() {
            return Err(ConfigError::MissingDefaultReceiver);
        }

        let mut seen = std::collections::HashSet::new();
        for recipient in &self.receiver {
            if !seen.insert(recipient.name.as_str()) {
                warn!(receiver = %recipient.name, "Duplicate receiver name; first entry wins");
            }
        }

        let directory = RecipientDirectory::new(self.receiver, self.default_receiver.mobile);
        Ok(match self.project_receivers {
            Some(routes) => {
                let routes = ProjectRoutes::new(routes);
                if routes.is_empty() {
                    warn!("project_receivers is empty; project routing disabled");
                }
                directory.with_project_routes(routes)
            }
            None => directory,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GATEWAY_ADDR format")]
    InvalidAddr,

    #[error("Invalid SMS_TIMEOUT_SECS value")]
    InvalidTimeout,

    #[error("Invalid ARGOCD_POLICY: {0} (expected broad or sync-only)")]
    InvalidPolicy(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid receivers file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("default_receiver.mobile is required")]
    MissingDefaultReceiver,
}
