//! Argo CD notification payload types.
//!
//! Field names follow the JSON emitted by the Argo CD notifications
//! controller webhook service. Every field is optional on the wire: absent
//! or `null` values decode to their empty default, so only structurally
//! invalid payloads fail to decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Well-known Argo CD status values.
pub mod status {
    pub const SYNCED: &str = "Synced";
    pub const OUT_OF_SYNC: &str = "OutOfSync";
    pub const UNKNOWN: &str = "Unknown";

    pub const HEALTHY: &str = "Healthy";
    pub const DEGRADED: &str = "Degraded";
    pub const MISSING: &str = "Missing";

    pub const SUCCEEDED: &str = "Succeeded";
    pub const FAILED: &str = "Failed";
    pub const ERROR: &str = "Error";
}

/// Project name Argo CD assigns when none is configured.
pub const DEFAULT_PROJECT: &str = "default";

/// A decoded Argo CD notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Free-text message rendered by the notification template.
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,

    /// The application the event is about.
    #[serde(default, deserialize_with = "nullable")]
    pub app: Application,

    /// Opaque context map configured on the notification service.
    #[serde(default)]
    pub context: Value,

    /// Notification service type (e.g. "webhook").
    #[serde(default, deserialize_with = "nullable")]
    pub service_type: String,
}

/// Argo CD application resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "nullable")]
    pub spec: ApplicationSpec,
    #[serde(default, deserialize_with = "nullable")]
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub project: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source: Source,
    #[serde(default, deserialize_with = "nullable")]
    pub destination: Destination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "repoURL", default, deserialize_with = "nullable")]
    pub repo_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub path: String,
    #[serde(default, deserialize_with = "nullable")]
    pub target_revision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, deserialize_with = "nullable")]
    pub server: String,
    #[serde(default, deserialize_with = "nullable")]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub sync: SyncStatus,
    #[serde(default, deserialize_with = "nullable")]
    pub health: HealthStatus,
    #[serde(default, deserialize_with = "nullable")]
    pub operation_state: OperationState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub revision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}

/// State of the last sync operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    #[serde(default, deserialize_with = "nullable")]
    pub phase: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable")]
    pub started_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub finished_at: String,
}

impl NotificationRecord {
    /// Decode a record from a raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Application name.
    pub fn app_name(&self) -> &str {
        &self.app.metadata.name
    }

    /// Argo CD project of the application.
    pub fn project(&self) -> &str {
        &self.app.spec.project
    }

    /// Namespace the application deploys into.
    pub fn namespace(&self) -> &str {
        &self.app.spec.destination.namespace
    }

    pub fn sync_status(&self) -> &str {
        &self.app.status.sync.status
    }

    pub fn health_status(&self) -> &str {
        &self.app.status.health.status
    }

    pub fn operation_phase(&self) -> &str {
        &self.app.status.operation_state.phase
    }

    pub fn operation_message(&self) -> &str {
        &self.app.status.operation_state.message
    }

    /// Explicit receiver override carried in `context.receiver`.
    ///
    /// Only non-empty string values count; anything else is treated as absent.
    pub fn context_receiver(&self) -> Option<&str> {
        self.context
            .get("receiver")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Decode `null` as the type's default, the way Argo CD templates sometimes
/// emit unset fields.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let body = json!({
            "message": "Application checkout has been deployed",
            "serviceType": "webhook",
            "context": {"argocdUrl": "https://argo.example.com", "receiver": "alert-devops"},
            "app": {
                "metadata": {"name": "checkout", "namespace": "argocd"},
                "spec": {
                    "project": "devops",
                    "source": {"repoURL": "https://git.example.com/checkout.git", "path": "deploy", "targetRevision": "main"},
                    "destination": {"server": "https://kubernetes.default.svc", "namespace": "payments"}
                },
                "status": {
                    "sync": {"status": "Synced", "revision": "abc123"},
                    "health": {"status": "Healthy"},
                    "operationState": {"phase": "Succeeded", "message": "successfully synced", "startedAt": "2025-10-06T12:00:00Z"}
                }
            }
        });

        let record: NotificationRecord = serde_json::from_value(body).unwrap();

        assert_eq!(record.app_name(), "checkout");
        assert_eq!(record.project(), "devops");
        assert_eq!(record.namespace(), "payments");
        assert_eq!(record.app.metadata.namespace, "argocd");
        assert_eq!(record.sync_status(), status::SYNCED);
        assert_eq!(record.health_status(), status::HEALTHY);
        assert_eq!(record.operation_phase(), status::SUCCEEDED);
        assert_eq!(record.operation_message(), "successfully synced");
        assert_eq!(record.app.spec.source.repo_url, "https://git.example.com/checkout.git");
        assert_eq!(record.context_receiver(), Some("alert-devops"));
    }

    #[test]
    fn test_decode_empty_object() {
        let record = NotificationRecord::from_slice(b"{}").unwrap();
        assert_eq!(record, NotificationRecord::default());
        assert_eq!(record.context_receiver(), None);
    }

    #[test]
    fn test_decode_nulls_as_empty() {
        let record = NotificationRecord::from_slice(
            br#"{"message": null, "app": {"spec": null, "status": {"sync": {"status": null}}}}"#,
        )
        .unwrap();
        assert_eq!(record.message, "");
        assert_eq!(record.project(), "");
        assert_eq!(record.sync_status(), "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(NotificationRecord::from_slice(b"not json").is_err());
        assert!(NotificationRecord::from_slice(br#"{"message": 42}"#).is_err());
    }

    #[test]
    fn test_context_receiver_requires_non_empty_string() {
        let mut record = NotificationRecord::default();

        record.context = json!({"receiver": ""});
        assert_eq!(record.context_receiver(), None);

        record.context = json!({"receiver": 7});
        assert_eq!(record.context_receiver(), None);

        record.context = json!(["receiver"]);
        assert_eq!(record.context_receiver(), None);

        record.context = json!({"receiver": "alert-ops"});
        assert_eq!(record.context_receiver(), Some("alert-ops"));
    }
}
