//! The config resolver: one live [`AppConfig`], resolved from three tiers
//! and fanned out to subscribers.
//!
//! Startup tiers, first hit wins:
//!
//! 1. the persisted override store
//! 2. the remote unified document, converted by [`transform`]
//! 3. the hard-coded default profile
//!
//! Every adopted value passes through the [`BuildPolicy`] and is broadcast
//! exactly once. Writes go through [`ConfigService::modify`], which persists
//! before it publishes.

use super::error::ConfigError;
use super::migration::migrate;
use super::persisted::PersistedConfig;
use super::remote::{ConfigFetcher, DEFAULT_UNIFIED_CONFIG_PATH, NoRemoteConfig, transform};
use super::storage::KeyValueStorage;
use super::store::{ConfigStore, ConfigStream, ConfigWatcher};
use super::validation::validate;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use storefront_sdk::config::{
    AppConfig, AppConfigPatch, MoyasarCredentials, PaypalCredentials, SectionUpdate,
    SmsCredentials, SmsProviderId, StcPayCredentials, StripeCredentials, ThemeSettings,
    default_config,
};
use storefront_sdk::objects::{ImportOutcome, ValidationReport};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Lifecycle of the resolver. There is no error state: every tier failure
/// falls through to the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Uninitialized,
    Loading,
    Ready,
}

/// Which tier produced the adopted config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Persisted,
    Remote,
    Default,
}

/// Build-time policy applied to every adopted config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildPolicy {
    /// Production builds never serve demo data.
    pub production: bool,
}

impl BuildPolicy {
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if self.production && config.use_demo_data {
            debug!("Production build, forcing useDemoData off");
            config.use_demo_data = false;
        }
        config
    }
}

/// Notified synchronously whenever an update touches the theme.
pub trait ThemeListener: Send + Sync {
    fn theme_changed(&self, theme: &ThemeSettings);
}

pub struct ConfigServiceBuilder {
    storage: Arc<dyn KeyValueStorage>,
    storage_key: Option<String>,
    fetcher: Arc<dyn ConfigFetcher>,
    remote_path: String,
    persist_on_load: bool,
    policy: BuildPolicy,
    theme_listener: Option<Arc<dyn ThemeListener>>,
}

impl ConfigServiceBuilder {
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn remote_path(mut self, path: impl Into<String>) -> Self {
        self.remote_path = path.into();
        self
    }

    /// Also persist a config adopted from the remote tier.
    pub fn persist_on_load(mut self, persist: bool) -> Self {
        self.persist_on_load = persist;
        self
    }

    pub fn policy(mut self, policy: BuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn theme_listener(mut self, listener: Arc<dyn ThemeListener>) -> Self {
        self.theme_listener = Some(listener);
        self
    }

    pub fn build(self) -> ConfigService {
        let persisted = match self.storage_key {
            Some(key) => PersistedConfig::with_key(self.storage, key),
            None => PersistedConfig::new(self.storage),
        };
        let (state_tx, _) = watch::channel(ResolverState::Uninitialized);
        ConfigService {
            inner: Arc::new(ServiceInner {
                store: ConfigStore::new(),
                persisted,
                fetcher: self.fetcher,
                remote_path: self.remote_path,
                persist_on_load: self.persist_on_load,
                policy: self.policy,
                theme_listener: self.theme_listener,
                state_tx,
                resolution: Mutex::new(()),
                resets: AtomicU64::new(0),
                writer: Mutex::new(()),
            }),
        }
    }
}

/// Handle to the config resolver. Cheap to clone; all clones share one
/// live config.
#[derive(Clone)]
pub struct ConfigService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    store: ConfigStore<AppConfig>,
    persisted: PersistedConfig,
    fetcher: Arc<dyn ConfigFetcher>,
    remote_path: String,
    persist_on_load: bool,
    policy: BuildPolicy,
    theme_listener: Option<Arc<dyn ThemeListener>>,
    state_tx: watch::Sender<ResolverState>,
    /// Held for the whole of an initialize or reset run.
    resolution: Mutex<()>,
    /// Completed reset runs.
    resets: AtomicU64,
    /// Held for every read-modify-write of the live config.
    writer: Mutex<()>,
}

impl ConfigService {
    pub fn builder(storage: Arc<dyn KeyValueStorage>) -> ConfigServiceBuilder {
        ConfigServiceBuilder {
            storage,
            storage_key: None,
            fetcher: Arc::new(NoRemoteConfig),
            remote_path: DEFAULT_UNIFIED_CONFIG_PATH.to_string(),
            persist_on_load: false,
            policy: BuildPolicy::default(),
            theme_listener: None,
        }
    }

    // -- Reads ---------------------------------------------------------------

    /// The live config, or `None` before the first resolution completes.
    pub fn get_config(&self) -> Option<Arc<AppConfig>> {
        self.inner.store.current()
    }

    /// The latest value (possibly `None`), then every change.
    pub fn config_stream(&self) -> ConfigStream<AppConfig> {
        self.inner.store.stream()
    }

    pub fn subscribe(&self) -> ConfigWatcher<AppConfig> {
        self.inner.store.subscribe()
    }

    pub fn state(&self) -> ResolverState {
        *self.inner.state_tx.borrow()
    }

    pub fn policy(&self) -> BuildPolicy {
        self.inner.policy
    }

    /// Resolve with the live config, initializing the service first if
    /// nobody has.
    pub async fn wait_for_config(&self) -> Arc<AppConfig> {
        if let Some(config) = self.get_config() {
            return config;
        }
        self.initialize().await;
        match self.get_config() {
            Some(config) => config,
            None => self.inner.store.publish(self.inner.policy.apply(default_config())),
        }
    }

    // -- Resolution ----------------------------------------------------------

    /// Run the startup tiers once. Later and concurrent calls return after
    /// the first run has completed.
    pub async fn initialize(&self) {
        if self.state() == ResolverState::Ready {
            return;
        }
        let _resolution = self.inner.resolution.lock().await;
        if self.state() == ResolverState::Ready {
            debug!("Config resolved by a concurrent initialize");
            return;
        }

        self.inner.state_tx.send_replace(ResolverState::Loading);
        let (config, source) = match self.inner.persisted.load().await {
            Ok(Some(config)) => (config, ConfigSource::Persisted),
            Ok(None) => self.resolve_remote_or_default().await,
            Err(e) => {
                warn!(error = %e, "Persisted config unusable, falling back");
                self.resolve_remote_or_default().await
            }
        };
        self.adopt(config, source).await;
    }

    /// Discard the persisted override and resolve again from the remote and
    /// default tiers. A call that arrives while a reset is running shares
    /// that run.
    pub async fn reset_config(&self) -> Arc<AppConfig> {
        let observed = self.inner.resets.load(Ordering::Acquire);
        let _resolution = self.inner.resolution.lock().await;
        if self.inner.resets.load(Ordering::Acquire) != observed {
            if let Some(config) = self.get_config() {
                debug!("Config reset by a concurrent caller");
                return config;
            }
        }

        // Writes queue behind the reset and land on top of its result.
        let _writer = self.inner.writer.lock().await;
        if let Err(e) = self.inner.persisted.clear().await {
            warn!(error = %e, "Failed to clear persisted config");
        }
        self.inner.state_tx.send_replace(ResolverState::Loading);
        let (config, source) = self.resolve_remote_or_default().await;
        let adopted = self.publish_adopted(config, source);
        self.inner.resets.fetch_add(1, Ordering::Release);
        info!("Config reset");
        adopted
    }

    async fn resolve_remote_or_default(&self) -> (AppConfig, ConfigSource) {
        match self.inner.fetcher.fetch(&self.inner.remote_path).await {
            Ok(document) => {
                let config = transform(&document);
                if self.inner.persist_on_load {
                    if let Err(e) = self.inner.persisted.save(&config).await {
                        warn!(error = %e, "Failed to persist remote config");
                    }
                }
                (config, ConfigSource::Remote)
            }
            Err(e) => {
                let e = ConfigError::from(e);
                warn!(error = %e, path = %self.inner.remote_path, "Remote config unavailable, using defaults");
                (default_config(), ConfigSource::Default)
            }
        }
    }

    async fn adopt(&self, config: AppConfig, source: ConfigSource) -> Arc<AppConfig> {
        let _writer = self.inner.writer.lock().await;
        self.publish_adopted(config, source)
    }

    /// Caller holds `writer`.
    fn publish_adopted(&self, config: AppConfig, source: ConfigSource) -> Arc<AppConfig> {
        let config = self.inner.policy.apply(config.normalized());
        let published = self.inner.store.publish(config);
        self.inner.state_tx.send_replace(ResolverState::Ready);
        info!(?source, app_name = %published.app_name, "Config ready");
        published
    }

    // -- Writes --------------------------------------------------------------

    /// The single read-modify-write path. Builds the next config from the
    /// live one, persists it (failure is logged, not returned), then
    /// broadcasts it.
    pub(crate) async fn modify<F>(&self, change: F) -> Arc<AppConfig>
    where
        F: FnOnce(&AppConfig) -> AppConfig,
    {
        let observed = self.wait_for_config().await;
        let _writer = self.inner.writer.lock().await;
        let current = self.get_config().unwrap_or(observed);

        let next = self.inner.policy.apply(change(&current).normalized());
        if let Err(e) = self.inner.persisted.save(&next).await {
            warn!(error = %e, "Failed to persist config update");
        }
        self.inner.store.publish(next)
    }

    pub(crate) fn notify_theme(&self, theme: &ThemeSettings) {
        if let Some(listener) = &self.inner.theme_listener {
            listener.theme_changed(theme);
        }
    }

    /// Shallow-merge `patch` over the live config.
    pub async fn update_config(&self, patch: AppConfigPatch) -> Arc<AppConfig> {
        let touches_theme = patch.touches_theme();
        let next = self.modify(move |current| patch.apply_to(current)).await;
        if touches_theme {
            self.notify_theme(&next.theme);
        }
        next
    }

    /// Replace one whole section.
    pub async fn update_section(&self, update: SectionUpdate) -> Arc<AppConfig> {
        let section = update.name();
        let touches_theme = matches!(update, SectionUpdate::Theme(_));
        let next = self.modify(move |current| update.apply_to(current)).await;
        if touches_theme {
            self.notify_theme(&next.theme);
        }
        debug!(section, "Section replaced");
        next
    }

    // -- Export / import / validate -----------------------------------------

    /// Pretty-printed JSON of the live config.
    pub async fn export_config(&self) -> Result<String, ConfigError> {
        let config = self.wait_for_config().await;
        serde_json::to_string_pretty(config.as_ref()).map_err(ConfigError::Serialize)
    }

    /// Replace the whole config from an exported document.
    ///
    /// The document must carry `storeUrl` and `appName` as non-empty
    /// strings; every
    /// other missing field takes its default.
    pub async fn import_config(&self, text: &str) -> ImportOutcome {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Rejected config import");
                return ImportOutcome::failed(e);
            }
        };
        let non_empty = |field: &str| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .is_some_and(|s| !s.is_empty())
        };
        let has_required = non_empty("storeUrl") && non_empty("appName");
        if !has_required {
            warn!("Rejected config import without storeUrl/appName");
            return ImportOutcome::invalid_file();
        }
        let imported = match AppConfig::from_json_value(value) {
            Ok(config) => migrate(config),
            Err(e) => {
                warn!(error = %e, "Rejected config import");
                return ImportOutcome::failed(e);
            }
        };

        let next = self.modify(move |_| imported).await;
        self.notify_theme(&next.theme);
        info!(app_name = %next.app_name, "Config imported");
        ImportOutcome::imported()
    }

    /// Check the live config. Read-only.
    pub async fn validate_config(&self) -> ValidationReport {
        validate(self.wait_for_config().await.as_ref())
    }

    // -- Effective credentials ----------------------------------------------

    fn current_or_default(&self) -> Arc<AppConfig> {
        self.get_config()
            .unwrap_or_else(|| Arc::new(self.inner.policy.apply(default_config())))
    }

    pub fn stripe_credentials(&self) -> StripeCredentials {
        self.current_or_default().stripe_credentials()
    }

    pub fn paypal_credentials(&self) -> PaypalCredentials {
        self.current_or_default().paypal_credentials()
    }

    pub fn moyasar_credentials(&self) -> MoyasarCredentials {
        self.current_or_default().moyasar_credentials()
    }

    pub fn stcpay_credentials(&self) -> StcPayCredentials {
        self.current_or_default().stcpay_credentials()
    }

    pub fn sms_credentials(&self, provider: SmsProviderId) -> SmsCredentials {
        self.current_or_default().sms_credentials(provider)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::error::FetchError;
    use crate::config::persisted::DEFAULT_STORAGE_KEY;
    use crate::config::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use storefront_sdk::config::UnifiedConfigDocument;
    use storefront_sdk::config::unified::{AppGroup, DevelopmentGroup};
    use tokio_stream::StreamExt;

    /// Fetcher double that counts calls and optionally delays its answer.
    pub(crate) struct ScriptedFetcher {
        pub(crate) calls: AtomicUsize,
        response: Option<UnifiedConfigDocument>,
        delay: Duration,
    }

    impl ScriptedFetcher {
        pub(crate) fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: None,
                delay: Duration::ZERO,
            })
        }

        pub(crate) fn serving(doc: UnifiedConfigDocument) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Some(doc),
                delay: Duration::ZERO,
            })
        }

        fn delayed(doc: UnifiedConfigDocument, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Some(doc),
                delay,
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConfigFetcher for ScriptedFetcher {
        async fn fetch(&self, _path: &str) -> Result<UnifiedConfigDocument, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.response
                .clone()
                .ok_or(FetchError::HttpStatus { code: 404 })
        }
    }

    #[derive(Default)]
    struct RecordingListener {
        seen: StdMutex<Vec<ThemeSettings>>,
    }

    impl ThemeListener for RecordingListener {
        fn theme_changed(&self, theme: &ThemeSettings) {
            self.seen.lock().unwrap().push(theme.clone());
        }
    }

    fn remote_doc(app_name: &str, demo: bool) -> UnifiedConfigDocument {
        UnifiedConfigDocument {
            app: Some(AppGroup {
                app_name: Some(app_name.to_string()),
                ..Default::default()
            }),
            development: Some(DevelopmentGroup {
                use_demo_data: Some(demo),
            }),
            ..Default::default()
        }
    }

    fn persisted_blob(app_name: &str) -> String {
        let mut config = default_config();
        config.app_name = app_name.to_string();
        serde_json::to_string(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_install_without_remote_uses_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        let fetcher = ScriptedFetcher::failing();
        let service = ConfigService::builder(storage.clone())
            .fetcher(fetcher.clone())
            .build();

        assert_eq!(service.state(), ResolverState::Uninitialized);
        assert!(service.get_config().is_none());

        service.initialize().await;

        assert_eq!(service.state(), ResolverState::Ready);
        assert_eq!(service.get_config().unwrap().as_ref(), &default_config());
        assert_eq!(fetcher.call_count(), 1);
        assert!(storage.get(DEFAULT_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persisted_tier_wins_and_remote_is_not_called() {
        let storage = Arc::new(MemoryStorage::with_entry(
            DEFAULT_STORAGE_KEY,
            persisted_blob("Stored"),
        ));
        let fetcher = ScriptedFetcher::serving(remote_doc("Remote", false));
        let service = ConfigService::builder(storage).fetcher(fetcher.clone()).build();

        let config = service.wait_for_config().await;
        assert_eq!(config.app_name, "Stored");
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_remote() {
        let storage = Arc::new(MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "{oops"));
        let fetcher = ScriptedFetcher::serving(remote_doc("Remote", false));
        let service = ConfigService::builder(storage).fetcher(fetcher.clone()).build();

        let config = service.wait_for_config().await;
        assert_eq!(config.app_name, "Remote");
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_config_is_persisted_only_when_asked() {
        let storage = Arc::new(MemoryStorage::new());
        let service = ConfigService::builder(storage.clone())
            .fetcher(ScriptedFetcher::serving(remote_doc("Remote", false)))
            .persist_on_load(true)
            .build();
        service.initialize().await;

        let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let stored: AppConfig = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored.app_name, "Remote");
    }

    #[tokio::test]
    async fn test_production_policy_forces_demo_data_off() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new()))
            .fetcher(ScriptedFetcher::serving(remote_doc("Remote", true)))
            .policy(BuildPolicy { production: true })
            .build();
        assert!(!service.wait_for_config().await.use_demo_data);

        let next = service
            .update_config(AppConfigPatch {
                use_demo_data: Some(true),
                ..Default::default()
            })
            .await;
        assert!(!next.use_demo_data);
    }

    #[tokio::test]
    async fn test_concurrent_initialize_runs_one_resolution() {
        let fetcher = ScriptedFetcher::delayed(remote_doc("Remote", false), Duration::from_millis(20));
        let service = ConfigService::builder(Arc::new(MemoryStorage::new()))
            .fetcher(fetcher.clone())
            .build();

        let (a, b, ()) = tokio::join!(
            service.wait_for_config(),
            service.wait_for_config(),
            service.initialize(),
        );
        assert_eq!(fetcher.call_count(), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(service.inner.store.version(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resets_share_one_run() {
        let fetcher = ScriptedFetcher::delayed(remote_doc("Remote", false), Duration::from_millis(20));
        let service = ConfigService::builder(Arc::new(MemoryStorage::new()))
            .fetcher(fetcher.clone())
            .build();
        service.initialize().await;
        assert_eq!(fetcher.call_count(), 1);

        let (a, b) = tokio::join!(service.reset_config(), service.reset_config());
        assert_eq!(fetcher.call_count(), 2);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_update_config_merges_persists_and_broadcasts() {
        let storage = Arc::new(MemoryStorage::new());
        let service = ConfigService::builder(storage.clone()).build();
        service.initialize().await;

        let mut stream = service.config_stream();
        let first = stream.next().await.flatten().unwrap();
        assert_eq!(first.app_name, "Your App Name");

        let next = service
            .update_config(AppConfigPatch {
                app_name: Some("Renamed".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(next.app_name, "Renamed");
        assert_eq!(next.store_url, first.store_url);
        assert_eq!(next.theme, first.theme);

        let emitted = stream.next().await.flatten().unwrap();
        assert!(Arc::ptr_eq(&emitted, &next));
        assert!(!Arc::ptr_eq(&emitted, &first));

        let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        assert!(stored.contains("\"appName\":\"Renamed\""));
    }

    #[tokio::test]
    async fn test_update_before_initialize_triggers_resolution() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let next = service
            .update_config(AppConfigPatch {
                country_code: Some("SA".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(next.country_code, "SA");
        assert_eq!(service.state(), ResolverState::Ready);
    }

    #[tokio::test]
    async fn test_theme_patch_notifies_listener_synchronously() {
        let listener = Arc::new(RecordingListener::default());
        let service = ConfigService::builder(Arc::new(MemoryStorage::new()))
            .theme_listener(listener.clone())
            .build();
        service.initialize().await;

        service
            .update_config(AppConfigPatch {
                app_name: Some("No theme".to_string()),
                ..Default::default()
            })
            .await;
        assert!(listener.seen.lock().unwrap().is_empty());

        let mut theme = ThemeSettings::default();
        theme.dark_mode = true;
        service
            .update_config(AppConfigPatch {
                theme: Some(theme.clone()),
                ..Default::default()
            })
            .await;
        assert_eq!(listener.seen.lock().unwrap().as_slice(), &[theme]);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        service
            .update_config(AppConfigPatch {
                app_name: Some("Round Trip".to_string()),
                tax_rate: Some(0.175),
                ..Default::default()
            })
            .await;
        let before = service.get_config().unwrap();
        let exported = service.export_config().await.unwrap();
        assert!(exported.contains("\n  \"schemaVersion\": 2"));

        let other = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let outcome = other.import_config(&exported).await;
        assert_eq!(outcome, ImportOutcome::imported());
        assert_eq!(other.get_config().unwrap().as_ref(), before.as_ref());
    }

    #[tokio::test]
    async fn test_import_requires_app_name() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        service.initialize().await;
        let before = service.get_config().unwrap();

        let outcome = service
            .import_config(r#"{"storeUrl":"https://x.example"}"#)
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid configuration file");
        assert!(Arc::ptr_eq(&service.get_config().unwrap(), &before));
    }

    #[tokio::test]
    async fn test_import_rejects_empty_required_fields() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        service.initialize().await;
        let before = service.get_config().unwrap();

        for text in [
            r#"{"storeUrl":"","appName":"X"}"#,
            r#"{"storeUrl":"https://x.example","appName":""}"#,
        ] {
            let outcome = service.import_config(text).await;
            assert!(!outcome.success, "{text}");
            assert_eq!(outcome.message, "Invalid configuration file");
        }
        assert!(Arc::ptr_eq(&service.get_config().unwrap(), &before));
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_json() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let outcome = service.import_config("not json").await;
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Import failed: "));
    }

    #[tokio::test]
    async fn test_import_fills_missing_fields_from_defaults() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let outcome = service
            .import_config(r#"{"storeUrl":"https://x.example","appName":"X","taxRate":0.05}"#)
            .await;
        assert!(outcome.success);
        let config = service.get_config().unwrap();
        assert_eq!(config.tax_rate, 0.05);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.schema_version, 2);
    }

    #[tokio::test]
    async fn test_reset_clears_store_and_demo_data() {
        let mut stored = default_config();
        stored.use_demo_data = true;
        stored.app_name = "Stored".to_string();
        let storage = Arc::new(MemoryStorage::with_entry(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&stored).unwrap(),
        ));
        let fetcher = ScriptedFetcher::failing();
        let service = ConfigService::builder(storage.clone())
            .fetcher(fetcher.clone())
            .build();
        assert!(service.wait_for_config().await.use_demo_data);

        let reset = service.reset_config().await;
        assert!(!reset.use_demo_data);
        assert_eq!(reset.app_name, "Your App Name");
        assert_eq!(fetcher.call_count(), 1);
        assert!(storage.get(DEFAULT_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_during_reset_lands_on_reset_result() {
        let storage = Arc::new(MemoryStorage::with_entry(
            DEFAULT_STORAGE_KEY,
            persisted_blob("Stored"),
        ));
        let fetcher = ScriptedFetcher::delayed(remote_doc("Remote", false), Duration::from_millis(50));
        let service = ConfigService::builder(storage.clone())
            .fetcher(fetcher.clone())
            .build();
        assert_eq!(service.wait_for_config().await.app_name, "Stored");

        let resetting = tokio::spawn({
            let service = service.clone();
            async move { service.reset_config().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let updated = service
            .update_config(AppConfigPatch {
                country_code: Some("SA".to_string()),
                ..Default::default()
            })
            .await;
        let reset = resetting.await.unwrap();

        assert_eq!(reset.app_name, "Remote");
        assert_eq!(updated.app_name, "Remote");
        assert_eq!(updated.country_code, "SA");
        assert!(Arc::ptr_eq(&service.get_config().unwrap(), &updated));

        let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let stored: AppConfig = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored.app_name, "Remote");
        assert_eq!(stored.country_code, "SA");
    }

    #[tokio::test]
    async fn test_validate_reports_missing_credentials_on_fresh_install() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let report = service.validate_config().await;
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
    }

    #[tokio::test]
    async fn test_effective_credentials_prefer_nested() {
        let mut stored = default_config();
        stored.moyasar_publishable_key = "pk_flat".to_string();
        let storage = Arc::new(MemoryStorage::with_entry(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&stored).unwrap(),
        ));
        let service = ConfigService::builder(storage).build();
        service.initialize().await;
        assert_eq!(service.moyasar_credentials().publishable_key, "pk_flat");
        assert_eq!(service.stripe_credentials().publishable_key, "");
        assert!(!service.sms_credentials(SmsProviderId::Twilio).is_configured());
    }
}
