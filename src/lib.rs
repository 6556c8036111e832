pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;

use actix_web::{HttpResponse, web};

/// Register every route. Shared by `main` and the handler tests; the caller
/// supplies the session middleware and the `ReportsApi` / `DashboardStore` data.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Public routes
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        // Root redirect
        .route("/", web::get().to(|| async { handlers::redirect("/dashboard") }))
        // Protected routes
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/dashboard/refresh", web::post().to(handlers::dashboard::refresh))
                .route("/dashboard/rows", web::get().to(handlers::feed_handlers::rows))
                .route("/dashboard/sectors", web::get().to(handlers::feed_handlers::sectors))
                .route("/reports/{id}/status", web::post().to(handlers::report_handlers::update_status))
                .route("/reports/{id}/delete", web::post().to(handlers::report_handlers::delete)),
        )
        // Default 404 handler (must be registered last)
        .default_service(web::to(|| async {
            let html = include_str!("../templates/errors/404.html");
            HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(html)
        }));
}
