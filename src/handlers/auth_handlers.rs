use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::ReportsApi;
use crate::auth::{csrf, session};
use crate::dashboard::{DashboardStore, actions};
use crate::errors::{AppError, render};
use crate::templates_structs::{APP_NAME, LoginTemplate};

use super::redirect;

#[derive(Deserialize)]
pub struct LoginForm {
    pub token: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, error: Option<&str>) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    let tmpl = LoginTemplate {
        error: error.map(String::from),
        app_name: APP_NAME.to_string(),
        csrf_token,
    };
    render(tmpl)
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if session::get_token(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    login_form(&session, None)
}

/// Store the bearer token and load its reports. A token change always
/// triggers a fresh listing.
pub async fn login_submit(
    api: web::Data<ReportsApi>,
    store: web::Data<DashboardStore>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let token = form.token.trim();
    if token.is_empty() {
        return login_form(&session, Some("Please enter an API token."));
    }

    if let Some(previous) = session::get_token(&session) {
        if previous != token {
            store.forget(&previous);
        }
    }

    session.renew();
    session::set_token(&session, token)?;

    if actions::load_reports(&api, &store, token).await.is_err() {
        session::set_flash(&session, actions::MSG_FETCH_FAILED);
    }

    Ok(redirect("/dashboard"))
}

pub async fn logout(
    store: web::Data<DashboardStore>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(token) = session::get_token(&session) {
        store.forget(&token);
    }
    session.purge();
    Ok(redirect("/login"))
}
