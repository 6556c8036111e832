//! JSON feeds polled by the dashboard page.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::auth::session;
use crate::dashboard::DashboardStore;
use crate::errors::AppError;

/// `GET /dashboard/rows`: status, row class and countdown per report.
pub async fn rows(
    store: web::Data<DashboardStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let token = session::require_token(&session)?;
    let now = Utc::now();
    let rows = store.read(&token, |view| view.rows(now)).unwrap_or_default();
    Ok(HttpResponse::Ok().json(rows))
}

/// `GET /dashboard/sectors`: report count per address sector.
pub async fn sectors(
    store: web::Data<DashboardStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let token = session::require_token(&session)?;
    let sectors = store.read(&token, |view| view.sectors()).unwrap_or_default();
    Ok(HttpResponse::Ok().json(sectors))
}
