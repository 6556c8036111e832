use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::api::ReportsApi;
use crate::auth::{csrf, session};
use crate::dashboard::{DashboardStore, actions};
use crate::errors::{AppError, render};
use crate::models::ReportStatus;
use crate::models::sector::sorted_by_sector;
use crate::templates_structs::{APP_NAME, DashboardTemplate, ReportRow, SectorRow, UpdateForm};

use super::auth_handlers::CsrfOnly;
use super::redirect;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub selected: Option<String>,
    pub status: Option<String>,
}

pub async fn index(
    api: web::Data<ReportsApi>,
    store: web::Data<DashboardStore>,
    session: Session,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let token = session::require_token(&session)?;

    let mut flash = session::take_flash(&session);
    if !store.is_loaded(&token) && actions::load_reports(&api, &store, &token).await.is_err() {
        flash.get_or_insert_with(|| actions::MSG_FETCH_FAILED.to_string());
    }

    let now = Utc::now();
    let preselect = query.status.as_deref().and_then(ReportStatus::parse);
    let (loaded, rows, form, sectors) = store
        .read(&token, |view| {
            let rows = view
                .reports()
                .iter()
                .map(|r| ReportRow::build(view, r, now))
                .collect::<Vec<_>>();
            let form = query
                .selected
                .as_deref()
                .and_then(|id| view.find(id))
                .and_then(|r| UpdateForm::for_report(r, preselect));
            let sectors = sorted_by_sector(view.sectors())
                .into_iter()
                .map(|(sector, count)| SectorRow { sector, count })
                .collect::<Vec<_>>();
            (view.loaded_at().is_some(), rows, form, sectors)
        })
        .unwrap_or((false, Vec::new(), None, Vec::new()));

    let tmpl = DashboardTemplate {
        app_name: APP_NAME.to_string(),
        flash,
        csrf_token: csrf::get_or_create_token(&session),
        loaded,
        rows,
        form,
        sectors,
    };
    render(tmpl)
}

/// Explicit reload from upstream.
pub async fn refresh(
    api: web::Data<ReportsApi>,
    store: web::Data<DashboardStore>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let token = session::require_token(&session)?;
    if actions::load_reports(&api, &store, &token).await.is_err() {
        session::set_flash(&session, actions::MSG_FETCH_FAILED);
    }
    Ok(redirect("/dashboard"))
}
