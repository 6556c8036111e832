//! Upstream round-trips triggered by staff actions. Every outcome collapses
//! to a flat message for the flash banner; details go to the log.

use chrono::{DateTime, Utc};

use crate::api::{ApiError, ReportsApi, StatusUpdate};
use crate::models::ReportStatus;
use crate::models::deadline::{format_deadline, resolve_form_deadline};

use super::DashboardStore;

pub const MSG_UPDATED: &str = "Report status updated successfully.";
pub const MSG_UPDATE_FAILED: &str = "Error updating report status.";
pub const MSG_DELETED: &str = "Report deleted successfully.";
pub const MSG_DELETE_FAILED: &str = "Error deleting report.";
pub const MSG_FETCH_FAILED: &str = "Error fetching reports.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(&'static str),
    Failure(&'static str),
}

impl ActionOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ActionOutcome::Success(m) | ActionOutcome::Failure(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }
}

/// Fetch the full listing and replace the token's view with it.
/// On failure the previous view is left untouched.
pub async fn load_reports(
    api: &ReportsApi,
    store: &DashboardStore,
    token: &str,
) -> Result<usize, ApiError> {
    match api.list_reports(token).await {
        Ok(reports) => {
            let count = reports.len();
            store.replace_reports(token, reports, Utc::now());
            log::debug!("Loaded {count} report(s)");
            Ok(count)
        }
        Err(e) => {
            log::error!("Error fetching reports: {e}");
            Err(e)
        }
    }
}

/// Reload after a successful write. Failures are only logged.
async fn refresh(api: &ReportsApi, store: &DashboardStore, token: &str) {
    let _ = load_reports(api, store, token).await;
}

/// Change a report's status upstream. `deadline_raw` is required for
/// in-progress and ignored otherwise.
pub async fn update_status(
    api: &ReportsApi,
    store: &DashboardStore,
    token: &str,
    report_id: &str,
    status_raw: &str,
    deadline_raw: &str,
    now: DateTime<Utc>,
) -> ActionOutcome {
    let Some(status) = ReportStatus::parse(status_raw) else {
        log::warn!("Rejected status update for {report_id}: unknown status '{status_raw}'");
        return ActionOutcome::Failure(MSG_UPDATE_FAILED);
    };

    let deadline = if status == ReportStatus::InProgress {
        match resolve_form_deadline(deadline_raw, now) {
            Some(d) => Some(d),
            None => {
                log::warn!("Rejected status update for {report_id}: unreadable deadline '{deadline_raw}'");
                return ActionOutcome::Failure(MSG_UPDATE_FAILED);
            }
        }
    } else {
        None
    };

    let body = StatusUpdate {
        status,
        estimated_completion_time: deadline.map(format_deadline),
    };

    match api.update_status(token, report_id, &body).await {
        Ok(()) => {
            log::info!("Report {report_id} set to {status}");
            store.with_view(token, |view| view.record_status_update(report_id, status, deadline));
            refresh(api, store, token).await;
            ActionOutcome::Success(MSG_UPDATED)
        }
        Err(e) => {
            log::error!("Error updating report status for {report_id}: {e}");
            ActionOutcome::Failure(MSG_UPDATE_FAILED)
        }
    }
}

/// Delete a report upstream and drop it, with its timer, locally.
pub async fn delete_report(
    api: &ReportsApi,
    store: &DashboardStore,
    token: &str,
    report_id: &str,
) -> ActionOutcome {
    match api.delete_report(token, report_id).await {
        Ok(()) => {
            log::info!("Report {report_id} deleted");
            store.with_view(token, |view| view.remove_report(report_id));
            refresh(api, store, token).await;
            ActionOutcome::Success(MSG_DELETED)
        }
        Err(e) => {
            log::error!("Error deleting report {report_id}: {e}");
            ActionOutcome::Failure(MSG_DELETE_FAILED)
        }
    }
}
