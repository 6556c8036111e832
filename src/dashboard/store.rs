use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::Report;

use super::DashboardView;

/// Dashboard views keyed by bearer token, shared between request handlers
/// and the sweeper. The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct DashboardStore {
    views: Arc<Mutex<HashMap<String, DashboardView>>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DashboardView>> {
        self.views.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a listing has ever been loaded for this token.
    pub fn is_loaded(&self, token: &str) -> bool {
        self.lock()
            .get(token)
            .is_some_and(|v| v.loaded_at().is_some())
    }

    /// Run `f` against the token's view, creating an empty one if needed.
    /// Marks the view as seen.
    pub fn with_view<R>(&self, token: &str, f: impl FnOnce(&mut DashboardView) -> R) -> R {
        let mut views = self.lock();
        let view = views.entry(token.to_string()).or_default();
        view.touch(Utc::now());
        f(view)
    }

    /// Run `f` against the view, if one exists. Marks the view as seen.
    pub fn read<R>(&self, token: &str, f: impl FnOnce(&DashboardView) -> R) -> Option<R> {
        let mut views = self.lock();
        let view = views.get_mut(token)?;
        view.touch(Utc::now());
        Some(f(view))
    }

    pub fn replace_reports(&self, token: &str, reports: Vec<Report>, now: DateTime<Utc>) {
        self.with_view(token, |view| view.replace_reports(reports, now));
    }

    /// Drop everything held for a token (logout).
    pub fn forget(&self, token: &str) {
        self.lock().remove(token);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop views nobody has touched for longer than `ttl` (abandoned
    /// sessions). Returns how many were removed.
    pub fn evict_idle(&self, now: DateTime<Utc>, ttl: TimeDelta) -> usize {
        let mut views = self.lock();
        let before = views.len();
        views.retain(|_, view| !view.is_idle(now, ttl));
        let evicted = before - views.len();
        if evicted > 0 {
            log::info!("Evicted {evicted} idle dashboard view(s)");
        }
        evicted
    }

    /// Sweep every view. Returns how many reports were reclassified failed.
    pub fn sweep_all(&self, now: DateTime<Utc>, grace: TimeDelta) -> usize {
        let mut views = self.lock();
        let mut total = 0;
        for view in views.values_mut() {
            let failed = view.sweep(now, grace);
            for id in &failed {
                log::info!("Report {id} is past its deadline, marked failed locally");
            }
            total += failed.len();
        }
        total
    }
}
