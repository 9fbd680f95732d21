use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::models::product::{FeedItem, Product};
use crate::routes::internal_on_missing;
use crate::store::PRODUCTS_KEY;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/feed-google.json", web::get().to(get_feed));
}

/// Google Shopping feed derived from the read-only product catalog.
async fn get_feed(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let catalog = state
        .store
        .read(PRODUCTS_KEY)
        .await
        .map_err(internal_on_missing)?;

    let products: Vec<Product> = serde_json::from_value(catalog)
        .map_err(|e| AppError::Internal(format!("Catálogo de produtos inválido: {}", e)))?;

    let items: Vec<FeedItem> = products
        .iter()
        .map(|p| FeedItem::from_product(p, &state.config.public_base_url))
        .collect();

    Ok(HttpResponse::Ok().json(json!({ "items": items })))
}
