//! Event classification.
//!
//! A [`ClassifierPolicy`] is an ordered rule table. Rules are evaluated top to
//! bottom and the first match decides the [`AlertType`]; later rules are not
//! consulted. A record that matches nothing is [`AlertDecision::Ignore`].

use std::fmt;
use std::str::FromStr;

use crate::record::{status, NotificationRecord};

/// Category label attached to a significant event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertType {
    OutOfSync,
    SyncUnknown,
    DeployFailed,
    DeployError,
    Degraded,
    Missing,
    Deployed,
    Healthy,
}

impl AlertType {
    /// Label used as the leading segment of a rendered message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfSync => "OUT OF SYNC",
            Self::SyncUnknown => "SYNC UNKNOWN",
            Self::DeployFailed => "DEPLOY FAILED",
            Self::DeployError => "DEPLOY ERROR",
            Self::Degraded => "DEGRADED",
            Self::Missing => "MISSING",
            Self::Deployed => "DEPLOYED",
            Self::Healthy => "HEALTHY",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// Not significant; nothing should be sent.
    Ignore,
    /// Significant, with its category.
    Alert(AlertType),
}

impl AlertDecision {
    pub fn is_significant(&self) -> bool {
        matches!(self, Self::Alert(_))
    }

    pub fn alert_type(&self) -> Option<AlertType> {
        match self {
            Self::Alert(alert_type) => Some(*alert_type),
            Self::Ignore => None,
        }
    }
}

/// A single classification rule.
struct Rule {
    matches: fn(&NotificationRecord) -> bool,
    alert_type: AlertType,
}

const BROAD_RULES: &[Rule] = &[
    Rule {
        matches: |r| r.operation_phase() == status::FAILED,
        alert_type: AlertType::DeployFailed,
    },
    Rule {
        matches: |r| r.operation_phase() == status::ERROR,
        alert_type: AlertType::DeployError,
    },
    Rule {
        matches: |r| r.sync_status() == status::OUT_OF_SYNC,
        alert_type: AlertType::OutOfSync,
    },
    Rule {
        matches: |r| r.health_status() == status::DEGRADED,
        alert_type: AlertType::Degraded,
    },
    Rule {
        matches: |r| r.health_status() == status::MISSING,
        alert_type: AlertType::Missing,
    },
    Rule {
        matches: |r| {
            r.operation_phase() == status::SUCCEEDED
                && r.message.to_lowercase().contains("deploy")
        },
        alert_type: AlertType::Deployed,
    },
    Rule {
        matches: |r| {
            r.health_status() == status::HEALTHY
                && r.sync_status() == status::SYNCED
                && r.operation_phase() == status::SUCCEEDED
        },
        alert_type: AlertType::Healthy,
    },
];

const SYNC_ONLY_RULES: &[Rule] = &[
    Rule {
        matches: |r| r.sync_status() == status::OUT_OF_SYNC,
        alert_type: AlertType::OutOfSync,
    },
    Rule {
        matches: |r| r.sync_status() == status::UNKNOWN,
        alert_type: AlertType::SyncUnknown,
    },
];

/// Which rule table to classify with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierPolicy {
    /// Failures, drift, degraded health, deploy confirmations and recovery.
    #[default]
    Broad,
    /// Only sync drift (`OutOfSync` or `Unknown`), for low-signal feeds.
    SyncOnly,
}

impl ClassifierPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broad => "broad",
            Self::SyncOnly => "sync-only",
        }
    }

    fn rules(&self) -> &'static [Rule] {
        match self {
            Self::Broad => BROAD_RULES,
            Self::SyncOnly => SYNC_ONLY_RULES,
        }
    }

    /// Classify a record under this policy.
    pub fn classify(&self, record: &NotificationRecord) -> AlertDecision {
        self.rules()
            .iter()
            .find(|rule| (rule.matches)(record))
            .map_or(AlertDecision::Ignore, |rule| {
                AlertDecision::Alert(rule.alert_type)
            })
    }
}

impl fmt::Display for ClassifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown classifier policy: {}", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for ClassifierPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broad" => Ok(Self::Broad),
            "sync-only" | "sync_only" | "sync" => Ok(Self::SyncOnly),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Classify a record under the given policy.
pub fn classify(policy: ClassifierPolicy, record: &NotificationRecord) -> AlertDecision {
    policy.classify(record)
}
