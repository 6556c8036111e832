//! Client for the upstream municipal reports API.

pub mod client;

pub use client::{ApiError, ReportsApi, StatusUpdate};
