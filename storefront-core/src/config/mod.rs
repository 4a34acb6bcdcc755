//! The configuration core: default profile, persisted override store,
//! remote unified config, the resolver and its section updaters.

mod error;
mod migration;
mod persisted;
mod remote;
mod service;
mod storage;
mod store;
mod updaters;
mod validation;

pub use error::{ConfigError, FetchError, StorageError};
pub use migration::{migrate, parse_and_migrate};
pub use persisted::{DEFAULT_STORAGE_KEY, PersistedConfig};
pub use remote::{
    ConfigFetcher, DEFAULT_UNIFIED_CONFIG_PATH, HttpConfigFetcher, NoRemoteConfig, to_unified,
    transform,
};
pub use service::{
    BuildPolicy, ConfigService, ConfigServiceBuilder, ConfigSource, ResolverState, ThemeListener,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{ConfigStore, ConfigStream, ConfigWatcher};
pub use validation::{is_hex_color, validate};
