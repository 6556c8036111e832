// Template context structures for Askama templates.

mod common;
mod dashboard;

pub use self::common::LoginTemplate;
pub use self::dashboard::{DashboardTemplate, ReportRow, SectorRow, StatusOption, UpdateForm};

pub const APP_NAME: &str = "Municipal Dashboard";
