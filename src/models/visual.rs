use serde::{Deserialize, Serialize};
use validator::Validate;

/// Banner ids below this value are client placeholders (mock data); they are
/// stripped before submission so the server assigns real identity.
pub const PROVISIONAL_ID_THRESHOLD: i64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct LogoConfig {
    pub url: String,
    pub alt: String,
    #[validate(range(min = 1))]
    pub width: u32,
    #[validate(range(min = 1))]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub url: String,
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub link: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct BannerSection {
    pub enabled: bool,
    pub autoplay: bool,
    /// Rotation interval in milliseconds.
    #[validate(range(min = 1))]
    pub interval: u32,
    pub items: Vec<Banner>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct VisualConfig {
    #[validate(nested)]
    pub logo: LogoConfig,
    #[validate(nested)]
    pub banners: BannerSection,
}

impl VisualConfig {
    /// Returns a copy with provisional banner ids removed.
    pub fn without_provisional_ids(&self) -> Self {
        let mut config = self.clone();
        for item in &mut config.banners.items {
            if let Some(id) = item.id {
                if id < PROVISIONAL_ID_THRESHOLD {
                    item.id = None;
                }
            }
        }
        config
    }
}

/// First-run content for `visual-config.json`.
pub fn default_visual_config() -> VisualConfig {
    VisualConfig {
        logo: LogoConfig {
            url: "/uploads/logo.png".to_string(),
            alt: "Logo da Loja".to_string(),
            width: 150,
            height: 50,
        },
        banners: BannerSection {
            enabled: true,
            autoplay: true,
            interval: 5000,
            items: Vec::new(),
        },
    }
}
