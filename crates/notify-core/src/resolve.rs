//! Receiver resolution.
//!
//! A notification is routed to exactly one [`Recipient`]. Strategies are tried
//! in priority order and the first one that names a configured recipient
//! wins; if none do, the default receiver is used.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::NotificationRecord;

/// Name reported for the fallback recipient.
pub const DEFAULT_RECEIVER_NAME: &str = "default";

pub const INFRA_RECEIVER: &str = "alert-infra";
pub const DEVOPS_RECEIVER: &str = "alert-devops";

/// A configured SMS recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub mobile: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: mobile.into(),
        }
    }
}

/// Lower-cased project name to receiver name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoutes {
    routes: HashMap<String, String>,
}

impl ProjectRoutes {
    /// Build a table from `(project, receiver)` pairs. Project keys are
    /// lower-cased so lookups are case-insensitive.
    pub fn new<I, K, V>(routes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            routes: routes
                .into_iter()
                .map(|(project, receiver)| (project.as_ref().to_lowercase(), receiver.into()))
                .collect(),
        }
    }

    /// Receiver name mapped to `project`, if any.
    pub fn get(&self, project: &str) -> Option<&str> {
        self.routes.get(&project.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for ProjectRoutes {
    fn default() -> Self {
        Self::new([
            ("infra", INFRA_RECEIVER),
            ("devops", DEVOPS_RECEIVER),
            ("ops", "alert-ops"),
            ("d1-lgc", "alert-d1-lgc-devops"),
            ("production", "alert-ops"),
            ("staging", DEVOPS_RECEIVER),
        ])
    }
}

/// The configured recipients, the default mobile number and the project
/// routing table. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct RecipientDirectory {
    recipients: Vec<Recipient>,
    default_mobile: String,
    project_routes: ProjectRoutes,
}

impl RecipientDirectory {
    pub fn new(recipients: Vec<Recipient>, default_mobile: impl Into<String>) -> Self {
        Self {
            recipients,
            default_mobile: default_mobile.into(),
            project_routes: ProjectRoutes::default(),
        }
    }

    /// Replace the built-in project routing table.
    pub fn with_project_routes(mut self, routes: ProjectRoutes) -> Self {
        self.project_routes = routes;
        self
    }

    /// Look up a configured recipient by exact name.
    pub fn find(&self, name: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.name == name)
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn project_routes(&self) -> &ProjectRoutes {
        &self.project_routes
    }

    /// The fallback recipient.
    pub fn default_recipient(&self) -> Recipient {
        Recipient::new(DEFAULT_RECEIVER_NAME, self.default_mobile.clone())
    }
}

/// The routing-relevant parts of an inbound notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingKeys<'a> {
    /// Explicit receiver name requested by the sender.
    pub receiver: Option<&'a str>,
    pub project: &'a str,
    pub namespace: &'a str,
}

impl<'a> From<&'a NotificationRecord> for RoutingKeys<'a> {
    fn from(record: &'a NotificationRecord) -> Self {
        Self {
            receiver: record.context_receiver(),
            project: record.project(),
            namespace: record.namespace(),
        }
    }
}

/// A resolution strategy. Returns `None` to fall through to the next one.
pub type Strategy =
    for<'k, 'd> fn(&RoutingKeys<'k>, &'d RecipientDirectory) -> Option<&'d Recipient>;

/// Use the receiver explicitly named by the notification.
pub fn by_override<'d>(keys: &RoutingKeys<'_>, dir: &'d RecipientDirectory) -> Option<&'d Recipient> {
    keys.receiver.and_then(|name| dir.find(name))
}

/// Map the project through the project routing table.
pub fn by_project<'d>(keys: &RoutingKeys<'_>, dir: &'d RecipientDirectory) -> Option<&'d Recipient> {
    dir.project_routes()
        .get(keys.project)
        .and_then(|name| dir.find(name))
}

/// Route infra and monitoring namespaces to their teams.
pub fn by_namespace<'d>(keys: &RoutingKeys<'_>, dir: &'d RecipientDirectory) -> Option<&'d Recipient> {
    if keys.namespace.contains("infra") {
        if let Some(recipient) = dir.find(INFRA_RECEIVER) {
            return Some(recipient);
        }
    }
    if keys.namespace.contains("monitoring") {
        return dir.find(DEVOPS_RECEIVER);
    }
    None
}

/// Strategies in priority order.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("override", by_override),
    ("project", by_project),
    ("namespace", by_namespace),
];

/// How a recipient was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub recipient: Recipient,
    /// Name of the strategy that matched, or `"default"`.
    pub strategy: &'static str,
}

/// Resolve routing keys against a directory, reporting the strategy used.
pub fn resolve_keys(keys: &RoutingKeys<'_>, dir: &RecipientDirectory) -> Resolution {
    STRATEGIES
        .iter()
        .find_map(|&(name, strategy)| {
            strategy(keys, dir).map(|recipient| Resolution {
                recipient: recipient.clone(),
                strategy: name,
            })
        })
        .unwrap_or_else(|| Resolution {
            recipient: dir.default_recipient(),
            strategy: DEFAULT_RECEIVER_NAME,
        })
}

/// Pick the recipient for a notification.
pub fn resolve(record: &NotificationRecord, dir: &RecipientDirectory) -> Recipient {
    resolve_keys(&RoutingKeys::from(record), dir).recipient
}
