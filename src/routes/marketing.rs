use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::marketing::MarketingConfig;
use crate::routes::internal_on_missing;
use crate::store::MARKETING_CONFIG_KEY;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_marketing_config))
        .route("", web::put().to(update_marketing_config));
}

async fn get_marketing_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = state
        .store
        .read(MARKETING_CONFIG_KEY)
        .await
        .map_err(internal_on_missing)?;

    Ok(HttpResponse::Ok().json(config))
}

/// Full replace: unlike the visual config, the marketing file holds exactly
/// the two tag ids and is rewritten wholesale.
async fn update_marketing_config(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let gtm_id = payload.get("gtm_id").and_then(Value::as_str);
    let ga4_id = payload.get("ga4_id").and_then(Value::as_str);

    let (Some(gtm_id), Some(ga4_id)) = (gtm_id, ga4_id) else {
        return Err(AppError::Validation(
            "Os campos gtm_id e ga4_id são obrigatórios.".to_string(),
        ));
    };

    let config = MarketingConfig {
        gtm_id: gtm_id.to_string(),
        ga4_id: ga4_id.to_string(),
    };
    let value = serde_json::to_value(&config)
        .map_err(|e| AppError::Internal(format!("Falha ao serializar configuração: {}", e)))?;

    state.store.write(MARKETING_CONFIG_KEY, &value).await?;
    tracing::info!("marketing-config.json atualizado");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Configuração de marketing atualizada com sucesso.",
        "config": config,
    })))
}
