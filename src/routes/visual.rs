use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::internal_on_missing;
use crate::store::VISUAL_CONFIG_KEY;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_visual_config))
        .route("", web::put().to(update_visual_config));
}

async fn get_visual_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = state
        .store
        .read(VISUAL_CONFIG_KEY)
        .await
        .map_err(internal_on_missing)?;

    Ok(HttpResponse::Ok().json(config))
}

/// Partial update: the payload's top-level keys are merged onto the persisted
/// object. Nested objects (`logo`, `banners`) are replaced wholesale when
/// present, never deep-merged.
async fn update_visual_config(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let Some(patch) = payload.as_object() else {
        return Err(AppError::BadRequest(
            "O corpo da requisição deve ser um objeto JSON.".to_string(),
        ));
    };

    let mut current = state
        .store
        .read(VISUAL_CONFIG_KEY)
        .await
        .map_err(internal_on_missing)?;
    let merged = current.as_object_mut().ok_or_else(|| {
        AppError::Internal("Configuração visual persistida não é um objeto.".to_string())
    })?;

    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }

    assign_banner_ids(&mut current);

    state.store.write(VISUAL_CONFIG_KEY, &current).await?;
    tracing::info!("visual-config.json atualizado");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Configurações visuais atualizadas com sucesso.",
        "config": current,
    })))
}

/// Banner items arriving without an id (the admin client strips provisional
/// ones) get a millisecond-timestamp identity on persist.
fn assign_banner_ids(config: &mut Value) {
    let Some(items) = config
        .pointer_mut("/banners/items")
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    let mut next = Utc::now().timestamp_millis();
    for item in items {
        if let Some(obj) = item.as_object_mut() {
            let has_id = obj.get("id").is_some_and(Value::is_number);
            if !has_id {
                obj.insert("id".to_string(), json!(next));
                next += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visual::default_visual_config;
    use crate::routes::test_support::test_state;
    use actix_web::{test, App};

    async fn seed(state: &web::Data<AppState>) {
        let default = serde_json::to_value(default_visual_config()).unwrap();
        state.store.write(VISUAL_CONFIG_KEY, &default).await.unwrap();
    }

    #[actix_web::test]
    async fn test_put_merges_top_level_keys() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        seed(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").configure(crate::routes::create_routes)),
        )
        .await;

        // Partial payload: only `banners` is sent, `logo` must survive.
        let req = test::TestRequest::put()
            .uri("/api/configuracoes-visuais")
            .set_json(json!({
                "banners": {
                    "enabled": false,
                    "autoplay": false,
                    "interval": 4000,
                    "items": [],
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get()
            .uri("/api/configuracoes-visuais")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["banners"]["interval"], 4000);
        assert_eq!(body["logo"]["alt"], "Logo da Loja");
    }

    #[actix_web::test]
    async fn test_put_rejects_non_object_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        seed(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").configure(crate::routes::create_routes)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/configuracoes-visuais")
            .set_json(json!(["not", "an", "object"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_put_assigns_ids_to_new_banners() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        seed(&state).await;

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").configure(crate::routes::create_routes)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/configuracoes-visuais")
            .set_json(json!({
                "banners": {
                    "enabled": true,
                    "autoplay": true,
                    "interval": 5000,
                    "items": [
                        {"url": "/uploads/a.jpg", "alt": "A", "active": true},
                        {"id": 1700000000000i64, "url": "/uploads/b.jpg", "alt": "B", "active": false},
                    ],
                }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let items = body["config"]["banners"]["items"].as_array().unwrap();
        assert!(items[0]["id"].is_i64());
        assert_eq!(items[1]["id"], 1700000000000i64);
    }

    #[actix_web::test]
    async fn test_get_missing_file_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").configure(crate::routes::create_routes)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/configuracoes-visuais")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
    }
}
