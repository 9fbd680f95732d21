use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{AppError, AppResult};

pub const VISUAL_CONFIG_KEY: &str = "visual-config";
pub const MARKETING_CONFIG_KEY: &str = "marketing-config";
pub const PRODUCTS_KEY: &str = "products";

/// Flat JSON file store rooted at the data directory.
///
/// Each key maps to `<dir>/<key>.json`. Writes go through a temp file and an
/// atomic rename, serialized by a single writer lock so concurrent PUTs to
/// the same key cannot interleave partial content.
pub struct JsonStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub async fn read(&self, key: &str) -> AppResult<Value> {
        let path = self.path(key);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "Arquivo de configuração {} não encontrado",
                    display_name(&path)
                )));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        serde_json::from_str(&data).map_err(|e| {
            AppError::Internal(format!(
                "Arquivo {} contém JSON inválido: {}",
                display_name(&path),
                e
            ))
        })
    }

    pub async fn write(&self, key: &str, value: &Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Internal(format!("Falha ao serializar {}: {}", key, e)))?;

        // Write-then-rename keeps readers from ever seeing a half-written file.
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await?;

        Ok(())
    }

    /// Create the file with `default` content iff it is absent. Idempotent,
    /// called once per key at process start.
    pub async fn ensure_exists(&self, key: &str, default: &Value) -> AppResult<()> {
        let path = self.path(key);
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Initializing {} with defaults", display_name(&path));
                self.write(key, default).await
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[actix_web::test]
    async fn test_read_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let err = store.read("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let value = json!({"gtm_id": "GTM-X", "ga4_id": "G-1"});
        store.write(MARKETING_CONFIG_KEY, &value).await.unwrap();

        let read = store.read(MARKETING_CONFIG_KEY).await.unwrap();
        assert_eq!(read, value);
    }

    #[actix_web::test]
    async fn test_ensure_exists_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let existing = json!({"gtm_id": "GTM-KEEP", "ga4_id": ""});
        store.write(MARKETING_CONFIG_KEY, &existing).await.unwrap();

        store
            .ensure_exists(MARKETING_CONFIG_KEY, &json!({"gtm_id": "", "ga4_id": ""}))
            .await
            .unwrap();
        store
            .ensure_exists(MARKETING_CONFIG_KEY, &json!({"gtm_id": "", "ga4_id": ""}))
            .await
            .unwrap();

        assert_eq!(store.read(MARKETING_CONFIG_KEY).await.unwrap(), existing);
    }

    #[actix_web::test]
    async fn test_ensure_exists_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let default = json!({"gtm_id": "", "ga4_id": ""});
        store
            .ensure_exists(MARKETING_CONFIG_KEY, &default)
            .await
            .unwrap();

        assert_eq!(store.read(MARKETING_CONFIG_KEY).await.unwrap(), default);
    }

    #[actix_web::test]
    async fn test_invalid_json_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        tokio::fs::write(dir.path().join("visual-config.json"), "{not json")
            .await
            .unwrap();

        let err = store.read(VISUAL_CONFIG_KEY).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
