use std::path::PathBuf;

use url::Url;

const DEFAULT_GA4_COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Public base URL used to build absolute links in the product feed.
    pub public_base_url: Url,
    /// Directory holding the JSON config files, the product catalog and the
    /// webhook audit logs.
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub cors_allow_origin: String,
    pub ga4_measurement_id: Option<String>,
    pub ga4_api_secret: Option<String>,
    pub ga4_collect_url: String,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        // A trailing slash makes Url::join treat the base as a directory.
        let mut public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        if !public_base_url.ends_with('/') {
            public_base_url.push('/');
        }
        let public_base_url = Url::parse(&public_base_url)?;

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let uploads_dir =
            PathBuf::from(std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let cors_allow_origin =
            std::env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let ga4_measurement_id = non_empty_var("GA4_MEASUREMENT_ID");
        let ga4_api_secret = non_empty_var("GA4_API_SECRET");
        let ga4_collect_url = std::env::var("GA4_COLLECT_URL")
            .unwrap_or_else(|_| DEFAULT_GA4_COLLECT_URL.to_string());

        Ok(Self {
            host,
            port,
            public_base_url,
            data_dir,
            uploads_dir,
            cors_allow_origin,
            ga4_measurement_id,
            ga4_api_secret,
            ga4_collect_url,
        })
    }

    /// Both GA4 credentials, or None when analytics forwarding is disabled.
    pub fn ga4_credentials(&self) -> Option<(&str, &str)> {
        match (&self.ga4_measurement_id, &self.ga4_api_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
