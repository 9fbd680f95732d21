use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;
use tracing::warn;
use validator::Validate;

use crate::models::visual::{Banner, BannerSection, LogoConfig, VisualConfig};

/// How long a save confirmation stays visible.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(3);

const VALIDATION_MESSAGE: &str =
    "Valores de Largura, Altura e Intervalo devem ser maiores que zero.";
const SAVE_ERROR_MESSAGE: &str = "Erro ao salvar configurações.";
const SAVED_MESSAGE: &str = "Salvo com sucesso!";

/// Mock structure the editor falls back to when the API cannot be reached,
/// so editing stays possible offline.
pub fn mock_visual_config() -> VisualConfig {
    VisualConfig {
        logo: LogoConfig {
            url: "https://via.placeholder.com/150x50.png?text=Logo".to_string(),
            alt: "Logo da Loja".to_string(),
            width: 150,
            height: 50,
        },
        banners: BannerSection {
            enabled: true,
            autoplay: true,
            interval: 5000,
            items: vec![
                Banner {
                    id: Some(1),
                    url: "https://via.placeholder.com/1920x600.png?text=Banner+1".to_string(),
                    alt: "Banner de Promoção".to_string(),
                    title: "Super Promoção".to_string(),
                    subtitle: "Até 50% de desconto".to_string(),
                    link: "/promocao".to_string(),
                    active: true,
                },
                Banner {
                    id: Some(2),
                    url: "https://via.placeholder.com/1920x600.png?text=Banner+2".to_string(),
                    alt: "Nova Coleção".to_string(),
                    title: "Chegou a Nova Coleção".to_string(),
                    subtitle: "Confira as novidades".to_string(),
                    link: "/colecao".to_string(),
                    active: false,
                },
            ],
        },
    }
}

/// Thin HTTP client for the visual-config endpoints.
pub struct VisualConfigApi {
    http: Client,
    endpoint: String,
}

#[allow(dead_code)]
impl VisualConfigApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!(
                "{}/api/configuracoes-visuais",
                base_url.trim_end_matches('/')
            ),
        }
    }

    pub async fn fetch(&self) -> Result<VisualConfig, reqwest::Error> {
        self.http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn update(&self, config: &VisualConfig) -> Result<(), reqwest::Error> {
        self.http
            .put(&self.endpoint)
            .json(config)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct LogoUpdate {
    pub url: Option<String>,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Default, Clone)]
pub struct BannerSettingsUpdate {
    pub enabled: Option<bool>,
    pub autoplay: Option<bool>,
    pub interval: Option<u32>,
}

#[derive(Debug, Default, Clone)]
pub struct BannerItemUpdate {
    pub url: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub link: Option<String>,
    pub active: Option<bool>,
}

/// Visual-settings editing flow: load, isolated field updates, client-side
/// validation, provisional-id stripping, submit, re-fetch.
pub struct VisualSettingsEditor {
    api: VisualConfigApi,
    pub config: VisualConfig,
    error: Option<String>,
    success: Option<(String, Instant)>,
}

#[allow(dead_code)]
impl VisualSettingsEditor {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: VisualConfigApi::new(base_url),
            config: mock_visual_config(),
            error: None,
            success: None,
        }
    }

    /// Fetches the current config; any failure substitutes the embedded mock
    /// instead of surfacing an error.
    pub async fn load(&mut self) {
        match self.api.fetch().await {
            Ok(config) => self.config = config,
            Err(e) => {
                warn!("Failed to fetch visual config, using mock data: {}", e);
                self.config = mock_visual_config();
            }
        }
    }

    pub fn update_logo(&mut self, update: LogoUpdate) {
        let logo = &mut self.config.logo;
        if let Some(url) = update.url {
            logo.url = url;
        }
        if let Some(alt) = update.alt {
            logo.alt = alt;
        }
        if let Some(width) = update.width {
            logo.width = width;
        }
        if let Some(height) = update.height {
            logo.height = height;
        }
    }

    pub fn update_banner_settings(&mut self, update: BannerSettingsUpdate) {
        let banners = &mut self.config.banners;
        if let Some(enabled) = update.enabled {
            banners.enabled = enabled;
        }
        if let Some(autoplay) = update.autoplay {
            banners.autoplay = autoplay;
        }
        if let Some(interval) = update.interval {
            banners.interval = interval;
        }
    }

    /// Returns false when no banner exists at `index`.
    pub fn update_banner_item(&mut self, index: usize, update: BannerItemUpdate) -> bool {
        let Some(item) = self.config.banners.items.get_mut(index) else {
            return false;
        };
        if let Some(url) = update.url {
            item.url = url;
        }
        if let Some(alt) = update.alt {
            item.alt = alt;
        }
        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(subtitle) = update.subtitle {
            item.subtitle = subtitle;
        }
        if let Some(link) = update.link {
            item.link = link;
        }
        if let Some(active) = update.active {
            item.active = active;
        }
        true
    }

    /// Appends a new banner with a timestamp-derived id; the id is replaced
    /// by the server on persist.
    pub fn add_banner(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis();
        self.config.banners.items.push(Banner {
            id: Some(id),
            url: String::new(),
            alt: String::new(),
            title: String::new(),
            subtitle: String::new(),
            link: String::new(),
            active: true,
        });
        id
    }

    pub fn remove_banner(&mut self, id: i64) {
        self.config.banners.items.retain(|item| item.id != Some(id));
    }

    /// Submits the full config. Validation failures block before any network
    /// call; on success the config is re-fetched to reconcile with
    /// server-assigned banner ids.
    pub async fn submit(&mut self) -> bool {
        self.error = None;
        self.success = None;

        if self.config.validate().is_err() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return false;
        }

        let payload = self.config.without_provisional_ids();
        match self.api.update(&payload).await {
            Ok(()) => {
                self.success = Some((SAVED_MESSAGE.to_string(), Instant::now()));
                if let Ok(config) = self.api.fetch().await {
                    self.config = config;
                }
                true
            }
            Err(e) => {
                warn!("Failed to save visual config: {}", e);
                self.error = Some(SAVE_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Save confirmations auto-clear after [`SUCCESS_MESSAGE_TTL`].
    pub fn success_message(&mut self) -> Option<&str> {
        if let Some((_, shown_at)) = &self.success {
            if shown_at.elapsed() >= SUCCESS_MESSAGE_TTL {
                self.success = None;
            }
        }
        self.success.as_ref().map(|(message, _)| message.as_str())
    }
}
