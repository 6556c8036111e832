//! Shared test infrastructure.
//!
//! - report fixtures and fixed clocks
//! - `FakeUpstream`: an in-process stand-in for the municipal reports API,
//!   bound to an ephemeral port, recording every call it receives

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, dev::ServerHandle, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use municipal_dashboard::api::ReportsApi;
use municipal_dashboard::models::{Report, ReportStatus};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TOKEN: &str = "staff-token-123";

// ============================================================================
// FIXTURES
// ============================================================================

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn report(id: &str, address: &str, status: ReportStatus, eta: Option<&str>) -> Report {
    Report {
        id: id.to_string(),
        address: Some(address.to_string()),
        status,
        estimated_completion_time: eta.map(String::from),
    }
}

// ============================================================================
// FAKE UPSTREAM
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeState {
    pub reports: Vec<Report>,
    pub calls: Vec<RecordedCall>,
    /// When set, every endpoint answers with this status code.
    pub fail_with: Option<u16>,
    /// When set, the listing endpoint returns this raw body instead.
    pub raw_listing: Option<String>,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeUpstream {
    pub base_url: String,
    pub state: Shared,
    handle: ServerHandle,
}

impl FakeUpstream {
    pub fn start(reports: Vec<Report>) -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState { reports, ..Default::default() }));
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fake upstream");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(data.clone()))
                .app_data(web::JsonConfig::default().content_type_required(false))
                .route("/api/municipal/reports", web::get().to(list))
                .route("/api/garbage-report/{id}/status", web::put().to(update))
                .route("/api/garbage-report/{id}", web::delete().to(remove))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self { base_url: format!("http://{addr}"), state, handle }
    }

    pub fn api(&self) -> ReportsApi {
        ReportsApi::new(&self.base_url, Duration::from_secs(5)).expect("Failed to build client")
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fail_with(&self, code: u16) {
        self.state.lock().unwrap().fail_with = Some(code);
    }

    pub fn set_raw_listing(&self, body: &str) {
        self.state.lock().unwrap().raw_listing = Some(body.to_string());
    }

    pub fn set_reports(&self, reports: Vec<Report>) {
        self.state.lock().unwrap().reports = reports;
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn record(state: &Shared, req: &HttpRequest, body: Option<Value>) -> Option<u16> {
    let mut st = state.lock().unwrap();
    st.calls.push(RecordedCall {
        method: req.method().to_string(),
        path: req.path().to_string(),
        authorization: req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });
    st.fail_with
}

fn failure(code: u16) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(code)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(serde_json::json!({ "error": "fake failure" }))
}

async fn list(state: web::Data<Shared>, req: HttpRequest) -> HttpResponse {
    if let Some(code) = record(&state, &req, None) {
        return failure(code);
    }
    let st = state.lock().unwrap();
    match &st.raw_listing {
        Some(raw) => HttpResponse::Ok().content_type("application/json").body(raw.clone()),
        None => HttpResponse::Ok().json(&st.reports),
    }
}

async fn update(
    state: web::Data<Shared>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();
    if let Some(code) = record(&state, &req, Some(body.clone())) {
        return failure(code);
    }
    let id = path.into_inner();
    let mut st = state.lock().unwrap();
    match st.reports.iter_mut().find(|r| r.id == id) {
        Some(report) => {
            if let Ok(status) = serde_json::from_value::<ReportStatus>(body["status"].clone()) {
                report.status = status;
            }
            report.estimated_completion_time = body["estimatedCompletionTime"].as_str().map(String::from);
            HttpResponse::Ok().json(serde_json::json!({ "message": "updated" }))
        }
        None => HttpResponse::NotFound().finish(),
    }
}

async fn remove(state: web::Data<Shared>, req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    if let Some(code) = record(&state, &req, None) {
        return failure(code);
    }
    let id = path.into_inner();
    let mut st = state.lock().unwrap();
    let before = st.reports.len();
    st.reports.retain(|r| r.id != id);
    if st.reports.len() < before {
        HttpResponse::Ok().json(serde_json::json!({ "message": "deleted" }))
    } else {
        HttpResponse::NotFound().finish()
    }
}
