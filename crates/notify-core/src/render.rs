//! SMS text rendering.

use crate::classify::AlertType;
use crate::record::{status, NotificationRecord, DEFAULT_PROJECT};

/// Separator placed between message segments.
pub const SEGMENT_DELIMITER: &str = " | ";

/// Maximum length of free-text segments.
pub const MAX_TEXT_LEN: usize = 50;

const ELLIPSIS: &str = "...";

/// Truncate `s` to at most `max_len` characters.
///
/// Longer strings keep their first `max_len - 3` characters followed by
/// `"..."`. Length is measured in characters, not bytes. Below three
/// characters only part of the ellipsis fits.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return ELLIPSIS[..max_len].to_string();
    }

    let keep = max_len - ELLIPSIS.len();
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Builder for a pipe-delimited SMS line.
#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    parts: Vec<String>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment unconditionally.
    pub fn push(&mut self, segment: impl Into<String>) -> &mut Self {
        self.parts.push(segment.into());
        self
    }

    /// Append `<label>: <value>` when `value` is non-empty.
    pub fn field(&mut self, label: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.parts.push(format!("{label}: {value}"));
        }
        self
    }

    /// Append `<label>: <value>` unless `value` is empty or equals `nominal`.
    pub fn field_unless(&mut self, label: &str, value: &str, nominal: &str) -> &mut Self {
        if value != nominal {
            self.field(label, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(&self) -> String {
        self.parts.join(SEGMENT_DELIMITER)
    }
}

/// Render a significant record as a single SMS line.
pub fn render(record: &NotificationRecord, alert_type: AlertType) -> String {
    let mut msg = MessageBuilder::new();

    msg.push(format!("[{alert_type}]"))
        .push(format!("App: {}", record.app_name()))
        .field_unless("Project", record.project(), DEFAULT_PROJECT)
        .field("NS", record.namespace())
        .field_unless("Sync", record.sync_status(), status::SYNCED)
        .field_unless("Health", record.health_status(), status::HEALTHY);

    let operation_message = record.operation_message();
    if !operation_message.is_empty() {
        msg.push(format!("Msg: {}", truncate(operation_message, MAX_TEXT_LEN)));
    }

    if !record.message.is_empty() && record.message != operation_message {
        msg.push(truncate(&record.message, MAX_TEXT_LEN));
    }

    msg.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_record() -> NotificationRecord {
        let mut record = NotificationRecord::default();
        record.app.metadata.name = "checkout".to_string();
        record.app.spec.project = "devops".to_string();
        record.app.spec.destination.namespace = "payments".to_string();
        record.app.status.operation_state.phase = "Failed".to_string();
        record
    }

    #[test]
    fn test_truncate_short_passthrough() {
        assert_eq!(truncate("", 50), "");
        assert_eq!(truncate("hello", 50), "hello");

        let exact = "x".repeat(50);
        assert_eq!(truncate(&exact, 50), exact);
    }

    #[test]
    fn test_truncate_long() {
        let long = "a".repeat(47) + "bcdef";
        let out = truncate(&long, 50);
        assert_eq!(out, "a".repeat(47) + "...");
        assert_eq!(out.chars().count(), 50);
    }

    #[test]
    fn test_truncate_tiny_limits() {
        assert_eq!(truncate("abcdef", 0), "");
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 3), "...");
        assert_eq!(truncate("abcdef", 4), "a...");
        assert_eq!(truncate("ab", 2), "ab");
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let once = truncate(&"z".repeat(120), 50);
        assert_eq!(truncate(&once, 50), once);
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "đ".repeat(60);
        let out = truncate(&long, 50);
        assert_eq!(out, "đ".repeat(47) + "...");
    }

    #[test]
    fn test_render_minimal() {
        let mut record = failed_record();
        record.app.spec.project.clear();
        record.app.spec.destination.namespace.clear();
        assert_eq!(render(&record, AlertType::DeployFailed), "[DEPLOY FAILED] | App: checkout");
    }

    #[test]
    fn test_render_all_segments() {
        let mut record = failed_record();
        record.app.status.sync.status = "OutOfSync".to_string();
        record.app.status.health.status = "Degraded".to_string();
        record.app.status.operation_state.message = "one or more objects failed to apply".to_string();
        record.message = "Sync of checkout failed".to_string();

        assert_eq!(
            render(&record, AlertType::DeployFailed),
            "[DEPLOY FAILED] | App: checkout | Project: devops | NS: payments | Sync: OutOfSync \
             | Health: Degraded | Msg: one or more objects failed to apply | Sync of checkout failed"
        );
    }

    #[test]
    fn test_render_omits_default_project_and_nominal_status() {
        let mut record = failed_record();
        record.app.spec.project = "default".to_string();
        record.app.status.sync.status = "Synced".to_string();
        record.app.status.health.status = "Healthy".to_string();

        let out = render(&record, AlertType::Healthy);
        assert!(!out.contains("Project:"));
        assert!(!out.contains("Sync:"));
        assert!(!out.contains("Health:"));
        assert_eq!(out, "[HEALTHY] | App: checkout | NS: payments");
    }

    #[test]
    fn test_render_suppresses_duplicate_message() {
        let mut record = failed_record();
        record.app.status.operation_state.message = "hook failed".to_string();
        record.message = "hook failed".to_string();

        let out = render(&record, AlertType::DeployFailed);
        assert_eq!(out.matches("hook failed").count(), 1);
        assert!(out.ends_with("| Msg: hook failed"));
    }

    #[test]
    fn test_render_truncates_free_text() {
        let mut record = failed_record();
        record.app.status.operation_state.message = "o".repeat(80);
        record.message = "m".repeat(80);

        let out = render(&record, AlertType::DeployFailed);
        let parts: Vec<&str> = out.split(SEGMENT_DELIMITER).collect();
        assert_eq!(parts[parts.len() - 2], format!("Msg: {}...", "o".repeat(47)));
        assert_eq!(parts[parts.len() - 1], format!("{}...", "m".repeat(47)));
    }

    #[test]
    fn test_builder_field_skips_empty() {
        let mut msg = MessageBuilder::new();
        assert!(msg.is_empty());
        msg.field("A", "").field("B", "x").field_unless("C", "ok", "ok");
        assert_eq!(msg.build(), "B: x");
    }
}
