use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// GA4 Measurement Protocol client for the purchase-event forward.
#[derive(Clone)]
pub struct Ga4Client {
    http: Client,
    collect_url: String,
    measurement_id: String,
    api_secret: String,
}

impl Ga4Client {
    /// None when either credential is missing; the relay then skips
    /// forwarding entirely.
    pub fn from_config(config: &Config) -> Option<Self> {
        let (measurement_id, api_secret) = config.ga4_credentials()?;
        Some(Self {
            http: Client::new(),
            collect_url: config.ga4_collect_url.clone(),
            measurement_id: measurement_id.to_string(),
            api_secret: api_secret.to_string(),
        })
    }

    /// Single, non-retried POST to the collector. GA4 answers 204 on
    /// acceptance; anything else surfaces the response body as an error for
    /// the caller to log.
    pub async fn send_purchase(
        &self,
        transaction_id: &str,
        value: f64,
        currency: &str,
    ) -> AppResult<()> {
        let event = purchase_event(transaction_id, value, currency);

        debug!(
            "Forwarding purchase event to GA4: transaction_id={}",
            transaction_id
        );

        let response = self
            .http
            .post(&self.collect_url)
            .query(&[
                ("measurement_id", self.measurement_id.as_str()),
                ("api_secret", self.api_secret.as_str()),
            ])
            .json(&event)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalService(format!(
            "GA4 collect returned {}: {}",
            status, body
        )))
    }
}

/// Measurement Protocol body for a purchase. The item list is a static
/// placeholder: the provider notification carries no cart detail.
pub fn purchase_event(transaction_id: &str, value: f64, currency: &str) -> Value {
    json!({
        "client_id": Uuid::new_v4().to_string(),
        "events": [{
            "name": "purchase",
            "params": {
                "transaction_id": transaction_id,
                "value": value,
                "currency": currency,
                "items": [{
                    "item_id": "PEDIDO-PAGSEGURO",
                    "item_name": "Pedido PagSeguro",
                    "quantity": 1,
                    "price": value,
                }],
            },
        }],
    })
}

/// Transaction id from the provider payload, or a generated fallback.
pub fn transaction_id_from(payload: &Value) -> String {
    payload
        .get("transaction_id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Monetary value from the provider payload (`amount` or `value`, numeric or
/// numeric string). Defaults to 0.0 when absent.
pub fn amount_from(payload: &Value) -> f64 {
    ["amount", "value"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|v| v.as_f64().or_else(|| v.as_str()?.parse().ok()))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_event_shape() {
        let event = purchase_event("TX-1", 99.9, "BRL");

        assert!(event["client_id"].as_str().is_some());
        let params = &event["events"][0]["params"];
        assert_eq!(event["events"][0]["name"], "purchase");
        assert_eq!(params["transaction_id"], "TX-1");
        assert_eq!(params["value"], 99.9);
        assert_eq!(params["currency"], "BRL");
        assert_eq!(params["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_transaction_id_prefers_payload() {
        let payload = json!({"transaction_id": "ABC"});
        assert_eq!(transaction_id_from(&payload), "ABC");
    }

    #[test]
    fn test_transaction_id_falls_back_to_generated() {
        let a = transaction_id_from(&json!({}));
        let b = transaction_id_from(&json!({"transaction_id": ""}));
        assert!(!a.is_empty());
        assert!(!b.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_amount_accepts_number_or_string() {
        assert_eq!(amount_from(&json!({"amount": 12.5})), 12.5);
        assert_eq!(amount_from(&json!({"value": "34.90"})), 34.9);
        assert_eq!(amount_from(&json!({})), 0.0);
    }
}
