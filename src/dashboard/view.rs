use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::models::deadline::format_deadline;
use crate::models::sector::sector_frequency;
use crate::models::{Report, ReportStatus};

use super::TimerMap;

/// Per-row state pushed to the page every second.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    pub id: String,
    pub status: ReportStatus,
    pub row_class: &'static str,
    pub countdown: String,
}

/// Reports and timers as one bearer token sees them.
///
/// Invariant: a timer exists only for a report that is in-progress here.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    reports: Vec<Report>,
    timers: TimerMap,
    loaded_at: Option<DateTime<Utc>>,
    last_seen: Option<DateTime<Utc>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn timers(&self) -> &TimerMap {
        &self.timers
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Last time a request touched this view.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = Some(now);
    }

    /// Idle views are evicted by the sweeper. A view never touched counts
    /// from its load time.
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        match self.last_seen.or(self.loaded_at) {
            Some(seen) => seen.checked_add_signed(ttl).is_some_and(|cutoff| now > cutoff),
            None => true,
        }
    }

    pub fn find(&self, report_id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == report_id)
    }

    /// Replace the list with a fresh upstream listing and reconcile timers.
    pub fn replace_reports(&mut self, reports: Vec<Report>, now: DateTime<Utc>) {
        self.reports = reports;
        self.loaded_at = Some(now);

        let in_progress: HashSet<&str> = self
            .reports
            .iter()
            .filter(|r| r.status == ReportStatus::InProgress)
            .map(|r| r.id.as_str())
            .collect();
        self.timers.retain(|id| in_progress.contains(id));

        // A listed deadline always wins; a timer set from the form survives
        // only while the listing carries no readable deadline.
        for report in &self.reports {
            if report.status == ReportStatus::InProgress {
                if let Some(deadline) = report.deadline() {
                    if self.timers.deadline(&report.id) != Some(deadline) {
                        self.timers.set(&report.id, deadline);
                    }
                }
            }
        }
    }

    /// Mark non-terminal reports failed once `deadline + grace` has passed.
    /// Returns the ids that changed.
    pub fn sweep_overdue(&mut self, now: DateTime<Utc>, grace: TimeDelta) -> Vec<String> {
        let mut failed = Vec::new();
        for report in &mut self.reports {
            if report.status.is_terminal() {
                continue;
            }
            let overdue = report
                .deadline()
                .and_then(|d| d.checked_add_signed(grace))
                .is_some_and(|cutoff| now > cutoff);
            if overdue {
                report.status = ReportStatus::Failed;
                failed.push(report.id.clone());
            }
        }
        for id in &failed {
            self.timers.clear(id);
        }
        failed
    }

    /// Mark in-progress reports failed when their countdown has run out.
    /// Returns the ids that changed.
    pub fn sweep_expired_timers(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut failed = Vec::new();
        for report in &mut self.reports {
            if report.status == ReportStatus::InProgress && self.timers.is_expired(&report.id, now) {
                report.status = ReportStatus::Failed;
                failed.push(report.id.clone());
            }
        }
        for id in &failed {
            self.timers.clear(id);
        }
        failed
    }

    /// One sweeper tick: both sweeps, overdue first.
    pub fn sweep(&mut self, now: DateTime<Utc>, grace: TimeDelta) -> Vec<String> {
        let mut failed = self.sweep_overdue(now, grace);
        failed.extend(self.sweep_expired_timers(now));
        failed
    }

    pub fn countdown(&self, report_id: &str, now: DateTime<Utc>) -> String {
        self.timers.remaining(report_id, now)
    }

    /// CSS class for a table row.
    pub fn row_class(&self, report: &Report, now: DateTime<Utc>) -> &'static str {
        match report.status {
            ReportStatus::Completed => "completed-row",
            ReportStatus::Failed => "status-failed",
            ReportStatus::Pending => "status-pending",
            ReportStatus::InProgress => {
                if self.timers.is_expired(&report.id, now) {
                    "status-failed"
                } else {
                    "status-in-progress"
                }
            }
            ReportStatus::Unknown => "",
        }
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<RowSnapshot> {
        self.reports
            .iter()
            .map(|r| RowSnapshot {
                id: r.id.clone(),
                status: r.status,
                row_class: self.row_class(r, now),
                countdown: self.countdown(&r.id, now),
            })
            .collect()
    }

    pub fn sectors(&self) -> BTreeMap<String, usize> {
        sector_frequency(&self.reports)
    }

    /// Apply a status change the upstream has accepted. In-progress gets a
    /// timer; any other status loses it.
    pub fn record_status_update(
        &mut self,
        report_id: &str,
        status: ReportStatus,
        deadline: Option<DateTime<Utc>>,
    ) {
        match (status, deadline) {
            (ReportStatus::InProgress, Some(deadline)) => self.timers.set(report_id, deadline),
            _ => {
                self.timers.clear(report_id);
            }
        }
        if let Some(report) = self.reports.iter_mut().find(|r| r.id == report_id) {
            report.status = status;
            if let (ReportStatus::InProgress, Some(deadline)) = (status, deadline) {
                report.estimated_completion_time = Some(format_deadline(deadline));
            }
        }
    }

    /// Drop a deleted report and its timer.
    pub fn remove_report(&mut self, report_id: &str) {
        self.reports.retain(|r| r.id != report_id);
        self.timers.clear(report_id);
    }
}
