//! Dashboard store: per-token views shared with the sweeper.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use municipal_dashboard::dashboard::{DashboardStore, scheduler};
use municipal_dashboard::models::ReportStatus;

mod common;
use common::*;

#[test]
fn test_views_are_isolated_per_token() {
    let store = DashboardStore::new();
    let now = utc(2024, 5, 1, 0, 0, 0);

    store.replace_reports("alice", vec![report("1", "", ReportStatus::Pending, None)], now);
    store.replace_reports("bob", vec![], now);

    assert_eq!(store.read("alice", |v| v.reports().len()), Some(1));
    assert_eq!(store.read("bob", |v| v.reports().len()), Some(0));
    assert_eq!(store.read("carol", |v| v.reports().len()), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_is_loaded_only_after_a_listing() {
    let store = DashboardStore::new();
    assert!(!store.is_loaded(TOKEN));

    store.with_view(TOKEN, |_| ());
    assert!(!store.is_loaded(TOKEN));

    store.replace_reports(TOKEN, vec![], utc(2024, 5, 1, 0, 0, 0));
    assert!(store.is_loaded(TOKEN));
}

#[test]
fn test_forget_drops_the_view() {
    let store = DashboardStore::new();
    store.replace_reports(TOKEN, vec![], utc(2024, 5, 1, 0, 0, 0));
    store.forget(TOKEN);
    assert!(store.is_empty());
    assert!(!store.is_loaded(TOKEN));
}

#[test]
fn test_sweep_all_covers_every_view() {
    let store = DashboardStore::new();
    let listed = utc(2024, 5, 1, 0, 0, 0);
    store.replace_reports(
        "alice",
        vec![report("a", "", ReportStatus::Pending, Some("2024-04-01T00:00:00Z"))],
        listed,
    );
    store.replace_reports(
        "bob",
        vec![
            report("b1", "", ReportStatus::InProgress, Some("2024-04-30T23:00:00Z")),
            report("b2", "", ReportStatus::Completed, Some("2024-04-01T00:00:00Z")),
        ],
        listed,
    );

    let failed = store.sweep_all(listed, TimeDelta::hours(24));

    assert_eq!(failed, 2);
    assert_eq!(
        store.read("alice", |v| v.find("a").unwrap().status),
        Some(ReportStatus::Failed)
    );
    assert_eq!(
        store.read("bob", |v| v.find("b1").unwrap().status),
        Some(ReportStatus::Failed)
    );
    assert_eq!(store.sweep_all(listed, TimeDelta::hours(24)), 0);
}

#[test]
fn test_clones_share_state() {
    let store = DashboardStore::new();
    let sweeper_side = store.clone();
    store.replace_reports(TOKEN, vec![], utc(2024, 5, 1, 0, 0, 0));
    assert!(sweeper_side.is_loaded(TOKEN));
}

#[test]
fn test_abandoned_views_are_evicted_after_idle_ttl() {
    let store = DashboardStore::new();
    let ttl = TimeDelta::hours(4);
    let listed = utc(2024, 5, 1, 0, 0, 0);
    store.replace_reports("abandoned-a", vec![], listed);
    store.replace_reports("abandoned-b", vec![], listed);

    assert_eq!(store.evict_idle(Utc::now(), ttl), 0);
    assert_eq!(store.len(), 2);

    let later = Utc::now() + ttl + TimeDelta::minutes(1);
    assert_eq!(store.evict_idle(later, ttl), 2);
    assert!(store.is_empty());
    assert!(!store.is_loaded("abandoned-a"));
}

#[test]
fn test_reading_a_view_marks_it_seen() {
    let store = DashboardStore::new();
    store.replace_reports(TOKEN, vec![], utc(2024, 5, 1, 0, 0, 0));
    let before = Utc::now();

    store.read(TOKEN, |_| ());

    let seen = store.read(TOKEN, |v| v.last_seen()).flatten().unwrap();
    assert!(seen >= before);
}

#[actix_rt::test]
async fn test_sweeper_task_reclassifies_through_the_store() {
    let store = DashboardStore::new();
    store.replace_reports(
        TOKEN,
        vec![report("late", "", ReportStatus::Pending, Some("2000-01-01T00:00:00Z"))],
        Utc::now(),
    );

    scheduler::spawn_sweeper(
        store.clone(),
        Duration::from_millis(10),
        TimeDelta::hours(24),
        TimeDelta::hours(4),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(
        store.read(TOKEN, |v| v.find("late").unwrap().status),
        Some(ReportStatus::Failed)
    );
}
