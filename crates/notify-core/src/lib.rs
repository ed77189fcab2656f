//! Notification classification and receiver resolution.
//!
//! This crate decides what to do with an inbound deployment or alert
//! notification:
//!
//! - [`classify`] decides whether an Argo CD event is worth an SMS
//! - [`render`] turns it into a short pipe-delimited line
//! - [`resolve`] picks the recipient from a [`RecipientDirectory`]
//!
//! Everything here is pure: no I/O, no clocks, no shared mutable state.
//!
//! # Example
//!
//! ```
//! use notify_core::{evaluate, ClassifierPolicy, NotificationRecord, Recipient, RecipientDirectory};
//!
//! let body = br#"{
//!     "app": {
//!         "metadata": {"name": "checkout"},
//!         "spec": {"project": "devops", "destination": {"namespace": "payments"}},
//!         "status": {"operationState": {"phase": "Failed"}}
//!     }
//! }"#;
//! let record = NotificationRecord::from_slice(body).unwrap();
//! let directory = RecipientDirectory::new(
//!     vec![Recipient::new("alert-devops", "+84900000002")],
//!     "+84900000000",
//! );
//!
//! let dispatch = evaluate(ClassifierPolicy::Broad, &record, &directory).unwrap();
//! assert_eq!(dispatch.recipient.name, "alert-devops");
//! assert_eq!(dispatch.message, "[DEPLOY FAILED] | App: checkout | Project: devops | NS: payments");
//! ```

pub mod alertmanager;
pub mod classify;
pub mod record;
pub mod render;
pub mod resolve;

pub use classify::{classify, AlertDecision, AlertType, ClassifierPolicy, UnknownPolicy};
pub use record::NotificationRecord;
pub use render::{render, truncate};
pub use resolve::{resolve, resolve_keys, ProjectRoutes, Recipient, RecipientDirectory, Resolution};

/// A significant notification, ready to hand to the SMS sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub alert_type: AlertType,
    pub message: String,
    pub recipient: Recipient,
    /// Resolver strategy that picked the recipient.
    pub strategy: &'static str,
}

/// Run the full pipeline for an Argo CD record.
///
/// Returns `None` when the record is not significant under `policy`; the
/// renderer and resolver are only run for significant records.
pub fn evaluate(
    policy: ClassifierPolicy,
    record: &NotificationRecord,
    directory: &RecipientDirectory,
) -> Option<Dispatch> {
    let alert_type = policy.classify(record).alert_type()?;
    let message = render(record, alert_type);
    let Resolution {
        recipient,
        strategy,
    } = resolve_keys(&resolve::RoutingKeys::from(record), directory);

    Some(Dispatch {
        alert_type,
        message,
        recipient,
        strategy,
    })
}

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
