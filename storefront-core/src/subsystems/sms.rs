//! SMS provider selection for phone verification.

use kanau::processor::Processor;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use storefront_sdk::config::{AppConfig, SmsProviderId};
use tokio::sync::watch;
use tracing::debug;

const GLOBAL: &[&str] = &["*"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsProviderInfo {
    pub id: SmsProviderId,
    pub name: &'static str,
    pub description: &'static str,
    pub supported_countries: &'static [&'static str],
    pub pricing: &'static str,
}

impl SmsProviderInfo {
    pub fn supports_country(&self, country: &str) -> bool {
        self.supported_countries == GLOBAL || self.supported_countries.contains(&country)
    }
}

pub fn provider_info(id: SmsProviderId) -> &'static SmsProviderInfo {
    match id {
        SmsProviderId::Twilio => &SMS_CATALOG[0],
        SmsProviderId::Firebase => &SMS_CATALOG[1],
        SmsProviderId::MessageBird => &SMS_CATALOG[2],
        SmsProviderId::Vonage => &SMS_CATALOG[3],
        SmsProviderId::AwsSns => &SMS_CATALOG[4],
        SmsProviderId::Taqnyat => &SMS_CATALOG[5],
    }
}

#[rustfmt::skip]
pub static SMS_CATALOG: [SmsProviderInfo; 6] = [
    SmsProviderInfo { id: SmsProviderId::Twilio, name: "Twilio", description: "Global SMS service with 180+ countries coverage", supported_countries: GLOBAL, pricing: "$0.0075 per SMS" },
    SmsProviderInfo { id: SmsProviderId::Firebase, name: "Firebase Auth", description: "Google Firebase Phone Authentication", supported_countries: GLOBAL, pricing: "Free up to 10K verifications/month" },
    SmsProviderInfo { id: SmsProviderId::MessageBird, name: "MessageBird", description: "European-based global SMS platform", supported_countries: GLOBAL, pricing: "$0.065 per SMS" },
    SmsProviderInfo { id: SmsProviderId::Vonage, name: "Vonage (Nexmo)", description: "Enterprise communication platform", supported_countries: GLOBAL, pricing: "$0.005 per SMS" },
    SmsProviderInfo { id: SmsProviderId::AwsSns, name: "AWS SNS", description: "Amazon Simple Notification Service", supported_countries: GLOBAL, pricing: "$0.00645 per SMS" },
    SmsProviderInfo { id: SmsProviderId::Taqnyat, name: "Taqnyat", description: "Saudi Arabia focused SMS service", supported_countries: &["SA", "AE", "KW", "BH", "QA", "OM"], pricing: "$0.03 per SMS" },
];

fn regional_recommendation(country: &str) -> SmsProviderId {
    match country {
        "SA" | "AE" => SmsProviderId::Taqnyat,
        "GB" | "DE" | "FR" => SmsProviderId::MessageBird,
        "CN" => SmsProviderId::Firebase,
        _ => SmsProviderId::Twilio,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsProviderStatus {
    #[serde(flatten)]
    pub info: SmsProviderInfo,
    pub configured: bool,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsState {
    /// Enabled providers in configured order.
    pub providers: Vec<SmsProviderStatus>,
    /// The configured default when enabled, else the first enabled provider.
    pub default_provider: Option<SmsProviderId>,
    pub country_code: String,
}

impl SmsState {
    pub fn derive(config: &AppConfig) -> Self {
        let default_provider = config
            .default_sms_provider
            .filter(|id| config.sms_providers.contains(id))
            .or_else(|| config.sms_providers.first().copied());
        let providers = config
            .sms_providers
            .iter()
            .map(|&id| SmsProviderStatus {
                info: *provider_info(id),
                configured: config.sms_credentials(id).is_configured(),
                is_default: default_provider == Some(id),
            })
            .collect();
        Self {
            providers,
            default_provider,
            country_code: config.country_code.clone(),
        }
    }

    pub fn is_enabled(&self, id: SmsProviderId) -> bool {
        self.providers.iter().any(|p| p.info.id == id)
    }

    pub fn providers_for_country(&self, country: &str) -> Vec<&SmsProviderStatus> {
        self.providers
            .iter()
            .filter(|p| p.info.supports_country(country))
            .collect()
    }

    /// The regional recommendation when enabled, else the first enabled
    /// provider.
    pub fn recommended_provider(&self, country: &str) -> Option<SmsProviderId> {
        let recommended = regional_recommendation(country);
        if self.is_enabled(recommended) {
            return Some(recommended);
        }
        self.providers.first().map(|p| p.info.id)
    }
}

/// Publishes the derived [`SmsState`].
pub struct SmsSubsystem {
    state_tx: watch::Sender<Option<Arc<SmsState>>>,
}

impl SmsSubsystem {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(None);
        Self { state_tx }
    }

    pub fn state(&self) -> Option<Arc<SmsState>> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<Option<Arc<SmsState>>> {
        self.state_tx.subscribe()
    }
}

impl Default for SmsSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor<Arc<AppConfig>> for SmsSubsystem {
    type Output = ();
    type Error = Infallible;

    async fn process(&self, config: Arc<AppConfig>) -> Result<(), Infallible> {
        let state = SmsState::derive(&config);
        debug!(
            enabled = state.providers.len(),
            default = ?state.default_provider,
            "SMS state derived"
        );
        self.state_tx.send_replace(Some(Arc::new(state)));
        Ok(())
    }
}
