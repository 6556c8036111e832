use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::api::ReportsApi;
use crate::auth::{csrf, session};
use crate::dashboard::{DashboardStore, actions};
use crate::errors::AppError;

use super::auth_handlers::CsrfOnly;
use super::redirect;

#[derive(Deserialize)]
pub struct StatusForm {
    pub csrf_token: String,
    pub status: String,
    #[serde(default)]
    pub estimated_completion_time: String,
}

pub async fn update_status(
    api: web::Data<ReportsApi>,
    store: web::Data<DashboardStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let token = session::require_token(&session)?;
    let report_id = path.into_inner();

    let outcome = actions::update_status(
        &api,
        &store,
        &token,
        &report_id,
        &form.status,
        &form.estimated_completion_time,
        Utc::now(),
    )
    .await;

    session::set_flash(&session, outcome.message());
    Ok(redirect("/dashboard"))
}

pub async fn delete(
    api: web::Data<ReportsApi>,
    store: web::Data<DashboardStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let token = session::require_token(&session)?;
    let report_id = path.into_inner();

    let outcome = actions::delete_report(&api, &store, &token, &report_id).await;

    session::set_flash(&session, outcome.message());
    Ok(redirect("/dashboard"))
}
