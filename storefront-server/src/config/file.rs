//! TOML file configuration structures.
//!
//! These structs directly map to the `storefront.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use storefront_core::config::{DEFAULT_STORAGE_KEY, DEFAULT_UNIFIED_CONFIG_PATH};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Admin configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// The admin secret. If this is plaintext (doesn't start with `$argon2`),
    /// it will be hashed and the config file will be rewritten.
    pub secret: String,
}

/// Where the persisted override lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// The remote unified config. Without `base_url` the remote tier is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
    #[serde(default = "default_remote_path")]
    pub path: String,
    /// Save the remote or default config to storage on first load.
    #[serde(default)]
    pub persist_on_load: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            path: default_remote_path(),
            persist_on_load: false,
        }
    }
}

fn default_remote_path() -> String {
    DEFAULT_UNIFIED_CONFIG_PATH.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub production: bool,
}

impl FileConfig {
    /// Check if the admin secret is already hashed (argon2 format).
    pub fn is_admin_secret_hashed(&self) -> bool {
        self.admin.secret.starts_with("$argon2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[admin]
secret = "test-secret"

[storage]
dir = "/var/lib/storefront"
key = "store-config"

[remote]
base_url = "https://cdn.example.com/app/"
persist_on_load = true

[build]
production = true
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.storage.dir, PathBuf::from("/var/lib/storefront"));
        assert_eq!(config.storage.key, "store-config");
        assert_eq!(
            config.remote.base_url.as_ref().map(Url::as_str),
            Some("https://cdn.example.com/app/")
        );
        assert_eq!(config.remote.path, "assets/config/unified-config.json");
        assert!(config.remote.persist_on_load);
        assert!(config.build.production);
        assert!(!config.is_admin_secret_hashed());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: FileConfig = toml::from_str("[admin]\nsecret = \"s\"\n").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.storage.key, "app-config");
        assert!(config.remote.base_url.is_none());
        assert!(!config.remote.persist_on_load);
        assert!(!config.build.production);
    }

    #[test]
    fn test_hashed_secret_detection() {
        let config = FileConfig {
            server: ServerConfig::default(),
            admin: AdminConfig {
                secret: "$argon2id$v=19$m=19456,t=2,p=1$abc123".to_string(),
            },
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
            build: BuildConfig::default(),
        };
        assert!(config.is_admin_secret_hashed());
    }
}
