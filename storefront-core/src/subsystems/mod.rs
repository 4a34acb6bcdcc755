//! Dependent subsystems.
//!
//! Each subsystem derives its own state from the latest [`AppConfig`] and
//! republishes it on a replay-latest `watch` channel:
//!
//! - `ThemeSubsystem`: CSS color variables, dark flag, text direction
//! - `RegionalSubsystem`: region, currency, active language
//! - `PaymentSubsystem`: enabled gateways joined with the gateway catalog
//! - `SmsSubsystem`: enabled providers joined with the provider catalog
//!
//! All of them implement `Processor<Arc<AppConfig>>` and are driven by
//! [`drive`].

pub mod payment;
pub mod regional;
pub mod sms;
pub mod theme;

pub use payment::{GatewayInfo, GatewayStatus, PaymentState, PaymentSubsystem};
pub use regional::{
    CurrencyInfo, RegionInfo, RegionalState, RegionalSubsystem, SymbolPosition, TextDirection,
    Translator,
};
pub use sms::{SmsProviderInfo, SmsProviderStatus, SmsState, SmsSubsystem};
pub use theme::{ColorVariants, ThemeState, ThemeSubsystem};

use crate::config::ConfigWatcher;
use kanau::processor::Processor;
use std::convert::Infallible;
use std::sync::Arc;
use storefront_sdk::config::AppConfig;
use tokio::sync::watch;
use tracing::{debug, info};

/// Feed every published config to `processor` until shutdown is signaled or
/// the config store goes away.
///
/// The value current at subscription time is processed first. `None`
/// (config not resolved yet) is skipped.
pub async fn drive<P>(
    name: &'static str,
    processor: Arc<P>,
    mut watcher: ConfigWatcher<AppConfig>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    P: Processor<Arc<AppConfig>, Output = (), Error = Infallible>,
{
    if let Some(config) = watcher.latest() {
        let Ok(()) = processor.process(config).await;
    }
    info!(subsystem = name, "Subsystem started");

    loop {
        tokio::select! {
            biased;

            // Shutdown has highest priority.
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!(subsystem = name, "Subsystem received shutdown signal");
                    break;
                }
            }

            changed = watcher.changed() => {
                if changed.is_err() {
                    info!(subsystem = name, "Config store closed");
                    break;
                }
                match watcher.latest() {
                    Some(config) => {
                        debug!(subsystem = name, "Deriving state from new config");
                        let Ok(()) = processor.process(config).await;
                    }
                    None => debug!(subsystem = name, "Config not resolved yet"),
                }
            }
        }
    }

    info!(subsystem = name, "Subsystem shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigService, MemoryStorage};
    use storefront_sdk::config::AppConfigPatch;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drive_follows_config_and_stops_on_shutdown() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        let sms = Arc::new(SmsSubsystem::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(drive(
            "sms",
            Arc::clone(&sms),
            service.subscribe(),
            shutdown_rx,
        ));

        let mut states = sms.subscribe_state();
        assert!(states.borrow().is_none());

        service.initialize().await;
        let state = states
            .wait_for(|s| s.is_some())
            .await
            .unwrap()
            .clone()
            .unwrap();
        assert_eq!(state.country_code, "US");

        service
            .update_config(AppConfigPatch {
                country_code: Some("SA".to_string()),
                ..Default::default()
            })
            .await;
        let state = states
            .wait_for(|s| s.as_ref().is_some_and(|s| s.country_code == "SA"))
            .await
            .unwrap()
            .clone();
        assert!(state.is_some());

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_drive_processes_value_current_at_start() {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        service.initialize().await;

        let theme = Arc::new(ThemeSubsystem::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(drive(
            "theme",
            Arc::clone(&theme),
            service.subscribe(),
            shutdown_rx,
        ));

        let mut states = theme.subscribe_state();
        let state = states
            .wait_for(|s| s.is_some())
            .await
            .unwrap()
            .clone()
            .unwrap();
        assert_eq!(
            state.css_variables.get("--ion-color-primary").map(String::as_str),
            Some("#ffd60a")
        );

        drop(shutdown_tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
