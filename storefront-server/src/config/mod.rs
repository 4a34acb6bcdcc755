//! Configuration module for storefront-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables. Also handles admin secret hashing.

pub mod admin;
pub mod file;

pub use admin::AdminConfig;

use crate::config::file::{FileConfig, RemoteConfig, StorageConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use storefront_core::config::BuildPolicy;
use thiserror::Error;
use tracing::info;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("password hashing error: {0}")]
    Hash(String),
}

/// Values given on the command line or through the environment. They win
/// over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub production: bool,
    pub remote_base_url: Option<Url>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub policy: BuildPolicy,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI and environment overrides
    /// 3. Validate the configuration
    /// 4. Hash the admin secret if it's plaintext (and rewrite the file)
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        // The file is rewritten below, so keep overrides out of it.
        let mut effective = file_config.clone();
        self.apply_overrides(&mut effective);
        validate(&effective)?;

        let secret_hash = if file_config.is_admin_secret_hashed() {
            file_config.admin.secret.clone()
        } else {
            let hash = hash_secret(&file_config.admin.secret)?;
            file_config.admin.secret = hash.clone();
            self.rewrite_config(&file_config)?;
            info!("Admin secret hashed and config file updated");
            hash
        };

        Ok(LoadedConfig {
            listen: effective.server.listen,
            admin: AdminConfig::new(secret_hash),
            storage: effective.storage,
            remote: effective.remote,
            policy: BuildPolicy {
                production: effective.build.production,
            },
        })
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        if let Some(listen) = self.overrides.listen {
            config.server.listen = listen;
        }
        if self.overrides.production {
            config.build.production = true;
        }
        if let Some(base_url) = &self.overrides.remote_base_url {
            config.remote.base_url = Some(base_url.clone());
        }
    }

    fn rewrite_config(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(config)?;

        // Write atomically: write to temp file, then rename
        let temp_path = self.config_path.with_extension("toml.tmp");
        std::fs::write(&temp_path, toml_string)?;
        std::fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.admin.secret.is_empty() {
        return Err(ConfigError::Validation("admin secret is empty".to_string()));
    }
    let key = &config.storage.key;
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "storage key {key:?} may only contain letters, digits, '-' and '_'"
        )));
    }
    if let Some(base_url) = &config.remote.base_url {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "remote base_url {base_url} must be http or https"
            )));
        }
        if config.remote.path.trim().is_empty() {
            return Err(ConfigError::Validation("remote path is empty".to_string()));
        }
    }
    Ok(())
}

pub(crate) fn hash_secret(plaintext: &str) -> Result<String, ConfigError> {
    use argon2::{
        Argon2, PasswordHasher,
        password_hash::{SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ConfigError::Hash(e.to_string()))
}
