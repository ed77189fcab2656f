//! Alertmanager (and VictoriaMetrics vmalert) webhook payloads.
//!
//! See <https://prometheus.io/docs/alerting/latest/configuration/#webhook_config>

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::{truncate, MessageBuilder, MAX_TEXT_LEN};
use crate::resolve::{by_namespace, RecipientDirectory, Resolution, RoutingKeys, DEFAULT_RECEIVER_NAME};

/// Whether an alert is firing or resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Firing,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Firing => "FIRING",
            Status::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level webhook body.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPost {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group_key: String,
    #[serde(default)]
    pub status: Status,
    /// Alertmanager receiver that produced this webhook.
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub group_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub common_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub common_annotations: BTreeMap<String, String>,
    #[serde(default, alias = "externalURL")]
    pub external_url: String,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// A single alert.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: String,
    #[serde(default, alias = "generatorURL")]
    pub generator_url: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl Alert {
    fn label(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Summary annotation, falling back to description.
    pub fn summary(&self) -> &str {
        ["summary", "description", "message"]
            .iter()
            .filter_map(|key| self.annotations.get(*key))
            .find(|text| !text.is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.label("alertname")
    }

    pub fn severity(&self) -> &str {
        self.label("severity")
    }

    pub fn namespace(&self) -> &str {
        self.label("namespace")
    }
}

/// Render one alert as an SMS line.
pub fn render_alert(alert: &Alert) -> String {
    let mut msg = MessageBuilder::new();
    msg.push(format!("[{}]", alert.status))
        .field("Alert", alert.name())
        .field("Severity", alert.severity())
        .field("NS", alert.namespace())
        .field("Instance", alert.label("instance"));

    let summary = alert.summary();
    if !summary.is_empty() && summary != alert.name() {
        msg.push(truncate(summary, MAX_TEXT_LEN));
    }
    msg.build()
}

/// Choose the recipient for an alert.
///
/// The Alertmanager receiver name is used when it matches a configured
/// recipient; otherwise the alert's namespace label is matched the same way
/// Argo CD destinations are, and finally the default receiver applies.
pub fn resolve_alert(post: &AlertPost, alert: &Alert, dir: &RecipientDirectory) -> Resolution {
    if let Some(recipient) = dir.find(&post.receiver) {
        return Resolution {
            recipient: recipient.clone(),
            strategy: "receiver",
        };
    }

    let keys = RoutingKeys {
        namespace: alert.namespace(),
        ..RoutingKeys::default()
    };
    match by_namespace(&keys, dir) {
        Some(recipient) => Resolution {
            recipient: recipient.clone(),
            strategy: "namespace",
        },
        None => Resolution {
            recipient: dir.default_recipient(),
            strategy: DEFAULT_RECEIVER_NAME,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Recipient;

    const BODY: &str = r#"{"receiver":"alert-infra","status":"firing","alerts":[{"status":"firing","labels":{"alertname":"NodeDiskFull","instance":"10.0.0.5:9100","namespace":"monitoring","severity":"critical"},"annotations":{"summary":"Disk usage on /var is above 95% and still climbing fast"},"startsAt":"2025-11-07T04:21:46.17Z","endsAt":"0001-01-01T00:00:00Z","generatorURL":"http://prometheus:9090/graph?g0.expr=disk","fingerprint":"543b6a7a3042ae2c"},{"status":"resolved","labels":{"alertname":"PodCrashLooping"},"annotations":{"description":"checkout restarted"},"startsAt":"2025-11-07T04:50:01.17Z","endsAt":"2025-11-07T05:00:00Z","generatorURL":"","fingerprint":"97130d38ef0ff0a4"}],"groupLabels":{},"commonLabels":{},"commonAnnotations":{},"externalURL":"http://alertmanager:9093","version":"4","groupKey":"{}:{}","truncatedAlerts":0}"#;

    #[test]
    fn test_alert_post_parsing() {
        let post: AlertPost = serde_json::from_str(BODY).unwrap();
        assert_eq!(post.receiver, "alert-infra");
        assert_eq!(post.status, Status::Firing);
        assert_eq!(post.external_url, "http://alertmanager:9093");
        assert_eq!(post.alerts.len(), 2);
        assert_eq!(post.alerts[1].status, Status::Resolved);
        assert_eq!(post.alerts[1].summary(), "checkout restarted");
    }

    #[test]
    fn test_render_alert() {
        let post: AlertPost = serde_json::from_str(BODY).unwrap();

        assert_eq!(
            render_alert(&post.alerts[0]),
            "[FIRING] | Alert: NodeDiskFull | Severity: critical | NS: monitoring \
             | Instance: 10.0.0.5:9100 | Disk usage on /var is above 95% and still climb..."
        );
        assert_eq!(
            render_alert(&post.alerts[1]),
            "[RESOLVED] | Alert: PodCrashLooping | checkout restarted"
        );
    }

    #[test]
    fn test_resolve_alert() {
        let dir = RecipientDirectory::new(
            vec![
                Recipient::new("alert-infra", "+1"),
                Recipient::new("alert-devops", "+2"),
            ],
            "+0",
        );
        let mut post: AlertPost = serde_json::from_str(BODY).unwrap();

        let res = resolve_alert(&post, &post.alerts[0], &dir);
        assert_eq!(res.recipient.name, "alert-infra");
        assert_eq!(res.strategy, "receiver");

        post.receiver = "webhook".to_string();
        let res = resolve_alert(&post, &post.alerts[0], &dir);
        assert_eq!(res.recipient.name, "alert-devops");
        assert_eq!(res.strategy, "namespace");

        let res = resolve_alert(&post, &post.alerts[1], &dir);
        assert_eq!(res.recipient.mobile, "+0");
        assert_eq!(res.strategy, "default");
    }
}
