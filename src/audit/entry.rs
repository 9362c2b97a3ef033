//! Audit log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::AuditEvent;

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    /// Short ID of the affected record; absent for whole-dataset events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    /// Category name, goal title or transaction description at the time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub event: AuditEvent,
}

impl AuditEntry {
    /// An event on a single record
    pub fn for_record(record_id: impl ToString, label: impl Into<String>, event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            record_id: Some(record_id.to_string()),
            label: Some(label.into()),
            event,
        }
    }

    /// An event on the data set as a whole
    pub fn for_dataset(event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            record_id: None,
            label: None,
            event,
        }
    }

    /// One or two lines for `fintrack audit`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event.heading()
        );

        match (&self.label, &self.record_id) {
            (Some(label), Some(id)) => output.push_str(&format!(": {} ({})", label, id)),
            (None, Some(id)) => output.push_str(&format!(": {}", id)),
            (Some(label), None) => output.push_str(&format!(": {}", label)),
            (None, None) => {}
        }

        if let Some(details) = self.event.details() {
            output.push_str("\n  ");
            output.push_str(&details);
        }

        output
    }
}
