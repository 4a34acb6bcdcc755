//! The persisted override tier.

use super::error::ConfigError;
use super::migration::parse_and_migrate;
use super::storage::KeyValueStorage;
use std::sync::Arc;
use storefront_sdk::config::AppConfig;
use tracing::debug;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "app-config";

/// Reads and writes the whole [`AppConfig`] as one JSON blob under a fixed key.
#[derive(Clone)]
pub struct PersistedConfig {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl PersistedConfig {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load and migrate the stored document, if any.
    pub async fn load(&self) -> Result<Option<AppConfig>, ConfigError> {
        let Some(raw) = self
            .storage
            .get(&self.key)
            .await
            .map_err(ConfigError::Storage)?
        else {
            debug!(key = %self.key, "No persisted config");
            return Ok(None);
        };
        let config = parse_and_migrate(&raw)?;
        Ok(Some(config))
    }

    pub async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let json = serde_json::to_string(config).map_err(ConfigError::Serialize)?;
        self.storage
            .set(&self.key, json)
            .await
            .map_err(ConfigError::Persist)?;
        debug!(key = %self.key, "Persisted config");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ConfigError> {
        self.storage
            .remove(&self.key)
            .await
            .map_err(ConfigError::Persist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::storage::MemoryStorage;
    use storefront_sdk::config::default_config;

    #[tokio::test]
    async fn test_save_then_load() {
        let persisted = PersistedConfig::new(Arc::new(MemoryStorage::new()));
        assert!(persisted.load().await.unwrap().is_none());

        let mut config = default_config();
        config.app_name = "Saved".to_string();
        persisted.save(&config).await.unwrap();

        assert_eq!(persisted.load().await.unwrap(), Some(config));

        persisted.clear().await.unwrap();
        assert!(persisted.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_parse_error() {
        let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "][");
        let persisted = PersistedConfig::new(Arc::new(storage));
        let err = persisted.load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
