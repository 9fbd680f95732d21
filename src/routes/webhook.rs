use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::services::analytics;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/pagseguro", web::post().to(pagseguro_webhook));
}

/// PagSeguro payment notification relay.
///
/// Only an empty or absent payload is rejected. Every call is recorded in
/// the audit log together with the analytics outcome (forwarded, skipped or
/// errored), and internal failures are swallowed: an error response here
/// would put the provider into a retry loop.
async fn pagseguro_webhook(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let is_empty = payload.is_null() || payload.as_object().is_some_and(|o| o.is_empty());
    if is_empty {
        return Err(AppError::BadRequest("Payload do webhook vazio.".to_string()));
    }

    let outcome = match &state.ga4 {
        Some(ga4) => {
            let transaction_id = analytics::transaction_id_from(&payload);
            let value = analytics::amount_from(&payload);

            match ga4.send_purchase(&transaction_id, value, "BRL").await {
                Ok(()) => {
                    info!("GA4 purchase forwarded: transaction_id={}", transaction_id);
                    format!("analytics=forwarded transaction_id={}", transaction_id)
                }
                Err(e) => {
                    error!("GA4 forward failed: {}", e);
                    format!("analytics=error {}", e)
                }
            }
        }
        None => {
            warn!("GA4 credentials not configured, skipping analytics forward");
            "analytics=skipped".to_string()
        }
    };

    let line = format!("payload={} {}", payload, outcome);
    if let Err(e) = state.audit.append(&line).await {
        // The acknowledgment must go out even when the log is unwritable.
        error!("Failed to append webhook audit log: {}", e);
    }

    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
