use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde::Serialize;

use crate::models::{Report, ReportStatus};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ApiError {
    HttpClientBuild(String),
    InvalidUrl(String),
    Request(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpClientBuild(e) => write!(f, "HTTP client build error: {e}"),
            ApiError::InvalidUrl(e) => write!(f, "Invalid API URL: {e}"),
            ApiError::Request(e) => write!(f, "API request failed: {e}"),
            ApiError::Status(code) => write!(f, "API returned status {code}"),
            ApiError::Decode(e) => write!(f, "API response decode error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Body of `PUT /api/garbage-report/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: ReportStatus,
    pub estimated_completion_time: Option<String>,
}

#[derive(Clone)]
pub struct ReportsApi {
    http: reqwest::Client,
    base_url: Url,
}

impl ReportsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `GET /api/municipal/reports`
    pub async fn list_reports(&self, token: &str) -> Result<Vec<Report>, ApiError> {
        let url = self.endpoint(&["api", "municipal", "reports"])?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = check_status(response)?;
        response
            .json::<Vec<Report>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `PUT /api/garbage-report/{id}/status`
    pub async fn update_status(
        &self,
        token: &str,
        report_id: &str,
        update: &StatusUpdate,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "garbage-report", report_id, "status"])?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        check_status(response).map(|_| ())
    }

    /// `DELETE /api/garbage-report/{id}`
    pub async fn delete_report(&self, token: &str, report_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "garbage-report", report_id])?;
        let response = self
            .http
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        check_status(response).map(|_| ())
    }

    /// Append path segments to the base URL; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}
