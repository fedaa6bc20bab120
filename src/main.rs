use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use mongodb::Client;

use portfolio_api::app::configure_routes;
use portfolio_api::config::AppConfig;
use portfolio_api::db::{AboutStore, MongoStore, SkillStore};
use portfolio_api::token::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    let _ = dotenvy::dotenv();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting Portfolio API...");

    let settings = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    if !settings.cors_origins.is_empty() {
        // CORS enforcement sits in front of this service; the list is only
        // surfaced here so deployments can see what was picked up.
        log::info!("Allowed cross-origin callers: {}", settings.cors_origins.join(", "));
    }

    log::info!("Connecting to MongoDB at {}...", settings.mongodb_uri);
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let store = Arc::new(MongoStore::new(client.clone(), &settings.database_name));
    let skill_store: Arc<dyn SkillStore> = store.clone();
    let about_store: Arc<dyn AboutStore> = store;

    let tokens = TokenService::new(&settings.token_secret, settings.token_expiry_hours);

    log::info!(
        "Starting HTTP server at {}:{} ({:?} storage, auth {})...",
        settings.host,
        settings.port,
        settings.skill_storage,
        if settings.require_auth { "on" } else { "off" }
    );

    let bind_addr = (settings.host.clone(), settings.port);
    let settings_for_app = settings.clone();

    let result = HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(web::Data::from(skill_store.clone()))
            .app_data(web::Data::from(about_store.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(settings_for_app.clone()))
            // Middleware
            .wrap(Logger::default())
            .configure(|cfg| configure_routes(cfg, &settings_for_app))
    })
    .bind(bind_addr)?
    .run()
    .await;

    log::info!("Releasing MongoDB connection");
    drop(client);

    result
}
