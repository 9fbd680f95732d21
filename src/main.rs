mod client;
mod config;
mod error;
mod models;
mod routes;
mod services;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpResponse, HttpServer,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::models::marketing::MarketingConfig;
use crate::models::visual::default_visual_config;
use crate::services::analytics::Ga4Client;
use crate::services::audit::AuditLog;
use crate::store::{JsonStore, MARKETING_CONFIG_KEY, VISUAL_CONFIG_KEY};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<JsonStore>,
    pub audit: Arc<AuditLog>,
    pub ga4: Option<Ga4Client>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting loja backend");

    let config = Config::from_env()?;
    info!("Configuration loaded from environment");

    tokio::fs::create_dir_all(&config.data_dir).await?;

    let store = Arc::new(JsonStore::new(&config.data_dir));
    store
        .ensure_exists(
            VISUAL_CONFIG_KEY,
            &serde_json::to_value(default_visual_config())?,
        )
        .await?;
    store
        .ensure_exists(
            MARKETING_CONFIG_KEY,
            &serde_json::to_value(MarketingConfig::default())?,
        )
        .await?;

    let ga4 = Ga4Client::from_config(&config);
    if ga4.is_none() {
        info!("GA4 credentials not configured, webhook analytics forwarding disabled");
    }

    let audit = Arc::new(AuditLog::new(config.data_dir.join("webhook-logs")));

    let state = web::Data::new(AppState {
        store,
        audit,
        ga4,
        config: config.clone(),
    });

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let cors_allow_origin = config.cors_allow_origin.clone();
    let uploads_dir = config.uploads_dir.clone();

    info!("Server running at http://{}", addr);

    HttpServer::new(move || {
        let cors = if cors_allow_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors = Cors::default();
            for origin in cors_allow_origin.split(',').map(|s| s.trim()) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allow_any_header()
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api").configure(routes::create_routes))
            .service(Files::new("/uploads", uploads_dir.clone()))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": true }))
}
