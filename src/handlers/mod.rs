pub mod auth_handlers;
pub mod dashboard;
pub mod feed_handlers;
pub mod report_handlers;

use actix_web::HttpResponse;

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
