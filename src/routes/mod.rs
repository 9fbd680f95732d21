pub mod feed;
pub mod marketing;
pub mod visual;
pub mod webhook;

use actix_web::web;

use crate::error::AppError;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/marketing-config").configure(marketing::create_routes))
        .service(web::scope("/configuracoes-visuais").configure(visual::create_routes))
        .service(web::scope("/webhooks").configure(webhook::create_routes))
        .configure(feed::create_routes);
}

/// The config endpoints answer a missing backing file with a generic 500,
/// not a 404: `ensure_exists` creates the files at startup, so absence means
/// the installation is broken.
pub(crate) fn internal_on_missing(err: AppError) -> AppError {
    match err {
        AppError::NotFound(msg) => AppError::Internal(msg),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use actix_web::web;
    use url::Url;

    use crate::config::Config;
    use crate::services::audit::AuditLog;
    use crate::store::JsonStore;
    use crate::AppState;

    pub fn test_state(dir: &Path) -> web::Data<AppState> {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_base_url: Url::parse("https://loja.example.com/").unwrap(),
            data_dir: dir.to_path_buf(),
            uploads_dir: dir.join("uploads"),
            cors_allow_origin: "*".to_string(),
            ga4_measurement_id: None,
            ga4_api_secret: None,
            ga4_collect_url: "https://www.google-analytics.com/mp/collect".to_string(),
        };

        web::Data::new(AppState {
            store: Arc::new(JsonStore::new(dir)),
            audit: Arc::new(AuditLog::new(dir.join("webhook-logs"))),
            ga4: None,
            config,
        })
    }
}
