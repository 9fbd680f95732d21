use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::visual::{Banner, BannerSection, LogoConfig, VisualConfig};

/// Bound on the primary fetch; past it the chain moves on to the fallback.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where a resolved configuration came from. Fallback resolutions are
/// distinguishable from genuine fetches in logs and in the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: VisualConfig,
    pub origin: ConfigOrigin,
}

/// Configuration source with a fallback chain: primary fetch with a bounded
/// timeout, shape validation, then the hardcoded constant. The storefront
/// must stay renderable with zero backend availability.
pub struct ConfigSource {
    http: Client,
    endpoint: String,
}

#[allow(dead_code)]
impl ConfigSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!(
                "{}/api/configuracoes-visuais",
                base_url.trim_end_matches('/')
            ),
        }
    }

    pub async fn resolve(&self) -> ResolvedConfig {
        match self.fetch().await {
            Ok(value) => {
                if has_expected_shape(&value) {
                    if let Ok(config) = serde_json::from_value::<VisualConfig>(value) {
                        info!("Visual config fetched from {}", self.endpoint);
                        return ResolvedConfig {
                            config,
                            origin: ConfigOrigin::Remote,
                        };
                    }
                }
                warn!("API response structure is invalid, falling back to local config");
            }
            Err(e) => {
                warn!("Error fetching visual config, falling back to local config: {}", e);
            }
        }

        ResolvedConfig {
            config: fallback_visual_config(),
            origin: ConfigOrigin::Fallback,
        }
    }

    async fn fetch(&self) -> Result<Value, reqwest::Error> {
        self.http
            .get(&self.endpoint)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// A usable response carries both the `logo` and `banners` keys.
pub fn has_expected_shape(value: &Value) -> bool {
    value.get("logo").is_some() && value.get("banners").is_some()
}

/// Placeholder configuration rendered when the backend is unavailable.
pub fn fallback_visual_config() -> VisualConfig {
    let banner = |id: i64, n: u32, active: bool| Banner {
        id: Some(id),
        url: format!("/fallback-banner-{}.jpg", n),
        alt: format!("Fallback Banner {}", n),
        title: String::new(),
        subtitle: String::new(),
        link: "#".to_string(),
        active,
    };

    VisualConfig {
        logo: LogoConfig {
            url: "/fallback-logo.png".to_string(),
            alt: "Default Logo".to_string(),
            width: 150,
            height: 50,
        },
        banners: BannerSection {
            enabled: true,
            autoplay: true,
            interval: 5000,
            items: vec![banner(1, 1, true), banner(2, 2, false), banner(3, 3, true)],
        },
    }
}
