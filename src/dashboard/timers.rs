use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::countdown;

/// Report id -> absolute deadline. Lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct TimerMap {
    deadlines: HashMap<String, DateTime<Utc>>,
}

impl TimerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, report_id: &str, deadline: DateTime<Utc>) {
        self.deadlines.insert(report_id.to_string(), deadline);
    }

    pub fn clear(&mut self, report_id: &str) -> Option<DateTime<Utc>> {
        self.deadlines.remove(report_id)
    }

    pub fn deadline(&self, report_id: &str) -> Option<DateTime<Utc>> {
        self.deadlines.get(report_id).copied()
    }

    pub fn contains(&self, report_id: &str) -> bool {
        self.deadlines.contains_key(report_id)
    }

    pub fn remaining(&self, report_id: &str, now: DateTime<Utc>) -> String {
        countdown::until(self.deadline(report_id), now)
    }

    /// True when a timer exists and its countdown shows zero, i.e. less
    /// than a whole second is left.
    pub fn is_expired(&self, report_id: &str, now: DateTime<Utc>) -> bool {
        self.deadline(report_id)
            .is_some_and(|d| countdown::until(Some(d), now) == countdown::ZERO)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.deadlines.retain(|id, _| keep(id));
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
