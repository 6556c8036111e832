use serde::{Deserialize, Serialize};

/// Lifecycle state of a garbage-collection report as the upstream API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    /// Any status string this dashboard does not know about.
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    /// Statuses the staff can pick in the update form, in display order.
    pub const SELECTABLE: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
            ReportStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Completed => "Completed",
            ReportStatus::Failed => "Failed",
            ReportStatus::Unknown => "Unknown",
        }
    }

    /// Parse a form value. Unknown strings are rejected rather than mapped to `Unknown`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(ReportStatus::Pending),
            "in-progress" => Some(ReportStatus::InProgress),
            "completed" => Some(ReportStatus::Completed),
            "failed" => Some(ReportStatus::Failed),
            _ => None,
        }
    }

    /// Completed and failed reports are never swept again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Completed | ReportStatus::Failed)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citizen-submitted report as listed by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub address: Option<String>,
    pub status: ReportStatus,
    #[serde(default)]
    pub estimated_completion_time: Option<String>,
}

impl Report {
    pub fn address_or_empty(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    /// Parsed estimated completion time, if present and readable.
    pub fn deadline(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.estimated_completion_time
            .as_deref()
            .and_then(super::deadline::parse_deadline)
    }
}
