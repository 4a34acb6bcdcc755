//! Application state shared across all request handlers.

use crate::config::AdminConfig;
use std::sync::Arc;
use storefront_core::config::ConfigService;
use storefront_core::subsystems::{
    PaymentSubsystem, RegionalSubsystem, SmsSubsystem, ThemeSubsystem, drive,
};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// The dependent subsystems following the config stream.
#[derive(Clone)]
pub struct Subsystems {
    pub theme: Arc<ThemeSubsystem>,
    pub regional: Arc<RegionalSubsystem>,
    pub payment: Arc<PaymentSubsystem>,
    pub sms: Arc<SmsSubsystem>,
}

impl Subsystems {
    pub fn new() -> Self {
        Self {
            theme: Arc::new(ThemeSubsystem::new()),
            regional: Arc::new(RegionalSubsystem::new(None)),
            payment: Arc::new(PaymentSubsystem::new()),
            sms: Arc::new(SmsSubsystem::new()),
        }
    }

    /// Start one driver task per subsystem. The tasks end once
    /// `shutdown_rx` flips to `true`.
    pub fn spawn(
        &self,
        service: &ConfigService,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(drive(
                "theme",
                Arc::clone(&self.theme),
                service.subscribe(),
                shutdown_rx.clone(),
            )),
            tokio::spawn(drive(
                "regional",
                Arc::clone(&self.regional),
                service.subscribe(),
                shutdown_rx.clone(),
            )),
            tokio::spawn(drive(
                "payment",
                Arc::clone(&self.payment),
                service.subscribe(),
                shutdown_rx.clone(),
            )),
            tokio::spawn(drive(
                "sms",
                Arc::clone(&self.sms),
                service.subscribe(),
                shutdown_rx,
            )),
        ]
    }
}

impl Default for Subsystems {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub service: ConfigService,
    pub subsystems: Subsystems,
    /// Admin credentials (can be reloaded via SIGHUP).
    pub admin: Arc<RwLock<AdminConfig>>,
}

impl AppState {
    pub fn new(service: ConfigService, subsystems: Subsystems, admin: AdminConfig) -> Self {
        Self {
            service,
            subsystems,
            admin: Arc::new(RwLock::new(admin)),
        }
    }
}
