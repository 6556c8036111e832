pub mod deadline;
pub mod report;
pub mod sector;

pub use report::{Report, ReportStatus};
