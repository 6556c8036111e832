use askama::Template;
use chrono::{DateTime, Utc};

use crate::dashboard::DashboardView;
use crate::models::{Report, ReportStatus};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub loaded: bool,
    pub rows: Vec<ReportRow>,
    pub form: Option<UpdateForm>,
    pub sectors: Vec<SectorRow>,
}

/// One line of the reports table.
pub struct ReportRow {
    pub id: String,
    pub address: String,
    pub status: &'static str,
    pub row_class: &'static str,
    pub estimated: String,
    pub countdown: String,
    pub is_failed: bool,
    pub is_completed: bool,
}

impl ReportRow {
    pub fn build(view: &DashboardView, report: &Report, now: DateTime<Utc>) -> Self {
        Self {
            id: report.id.clone(),
            address: report.address_or_empty().to_string(),
            status: report.status.as_str(),
            row_class: view.row_class(report, now),
            estimated: report.estimated_completion_time.clone().unwrap_or_default(),
            countdown: view.countdown(&report.id, now),
            is_failed: report.status == ReportStatus::Failed,
            is_completed: report.status == ReportStatus::Completed,
        }
    }
}

/// The "Update Report Status" form for the selected report.
pub struct UpdateForm {
    pub report_id: String,
    pub address: String,
    pub estimated: String,
    pub options: Vec<StatusOption>,
}

impl UpdateForm {
    /// `None` for reports that cannot be edited (completed or unknown).
    pub fn for_report(report: &Report, preselect: Option<ReportStatus>) -> Option<Self> {
        if matches!(report.status, ReportStatus::Completed | ReportStatus::Unknown) {
            return None;
        }
        let current = preselect.unwrap_or(report.status);
        let options = ReportStatus::SELECTABLE
            .iter()
            .map(|s| StatusOption {
                value: s.as_str(),
                label: s.label(),
                selected: *s == current,
            })
            .collect();
        Some(Self {
            report_id: report.id.clone(),
            address: report.address_or_empty().to_string(),
            estimated: report.estimated_completion_time.clone().unwrap_or_default(),
            options,
        })
    }
}

pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct SectorRow {
    pub sector: String,
    pub count: usize,
}
