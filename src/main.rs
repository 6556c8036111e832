use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use municipal_dashboard::api::ReportsApi;
use municipal_dashboard::config::Config;
use municipal_dashboard::dashboard::{DashboardStore, scheduler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let api = ReportsApi::new(&config.api_url, config.api_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("Using reports API at {}", api.base_url());

    let store = DashboardStore::new();
    scheduler::spawn_sweeper(store.clone(), config.sweep_interval, config.grace, config.view_idle_ttl);

    // Session encryption key; a generated key loses sessions on restart
    let secret_key = match &config.session_key {
        Some(val) => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        None => {
            log::warn!("No usable SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let api = web::Data::new(api);
    let store = web::Data::new(store);
    let cookie_secure = config.cookie_secure;

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(store.clone())
            .configure(municipal_dashboard::configure_app)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
