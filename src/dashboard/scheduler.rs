use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio::time::MissedTickBehavior;

use super::DashboardStore;

/// Spawn the deadline sweeper on the actix runtime. It runs for the life of
/// the server and also evicts views idle for longer than `idle_ttl`.
pub fn spawn_sweeper(store: DashboardStore, every: Duration, grace: TimeDelta, idle_ttl: TimeDelta) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let now = Utc::now();
            store.evict_idle(now, idle_ttl);
            let failed = store.sweep_all(now, grace);
            if failed > 0 {
                log::debug!("Sweeper reclassified {failed} report(s)");
            }
        }
    });
}
