//! In-memory dashboard state: report views, countdown timers and the
//! periodic sweeps that reclassify overdue reports.

pub mod actions;
pub mod countdown;
pub mod scheduler;
pub mod store;
pub mod timers;
pub mod view;

pub use store::DashboardStore;
pub use timers::TimerMap;
pub use view::{DashboardView, RowSnapshot};
