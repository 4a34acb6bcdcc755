//! Partial updates of the root document.

use super::app::AppConfig;
use super::features::FeatureToggles;
use super::ids::{PaymentGatewayId, SmsProviderId};
use super::payment::PaymentGateways;
use super::regional::RegionalSettings;
use super::sms::{
    AwsSnsConfig, FirebaseConfig, MessageBirdConfig, TaqnyatConfig, TwilioConfig, VonageConfig,
};
use super::theme::ThemeSettings;
use serde::{Deserialize, Serialize};

macro_rules! patch_struct {
    ($($field:ident: $ty:ty),* $(,)?) => {
        /// Top-level partial config. Each present field replaces the whole
        /// field of the same name; absent fields are left untouched.
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct AppConfigPatch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl AppConfigPatch {
            /// Shallow-merge onto `base`, producing a new document.
            pub fn apply_to(self, base: &AppConfig) -> AppConfig {
                let mut next = base.clone();
                $(
                    if let Some(value) = self.$field {
                        next.$field = value;
                    }
                )*
                next
            }
        }
    };
}

patch_struct! {
    name: String,
    version: String,
    app_name: String,
    app_slogan: String,
    store_description: String,
    logo_url: String,
    splash_screen_url: String,
    store_url: String,
    api_url: String,
    wordpress_url: String,
    consumer_key: String,
    consumer_secret: String,
    auth_code: String,
    jwt_auth_url: String,
    auth_token: String,
    theme: ThemeSettings,
    default_currency: String,
    default_language: String,
    supported_languages: Vec<String>,
    country_code: String,
    timezone: String,
    date_format: String,
    tax_rate: f64,
    shipping_enabled: bool,
    enabled_payment_gateways: Vec<PaymentGatewayId>,
    allow_demo_checkout: bool,
    payment_gateways: PaymentGateways,
    stripe_publishable_key: String,
    stripe_secret_key: String,
    paypal_client_id: String,
    paypal_client_secret: String,
    moyasar_publishable_key: String,
    moyasar_secret_key: String,
    sms_providers: Vec<SmsProviderId>,
    default_sms_provider: Option<SmsProviderId>,
    twilio_config: TwilioConfig,
    firebase_config: FirebaseConfig,
    message_bird_config: MessageBirdConfig,
    vonage_config: VonageConfig,
    aws_config: AwsSnsConfig,
    taqnyat_config: TaqnyatConfig,
    taqnyat_api_key: String,
    taqnyat_sender: String,
    one_signal_app_id: String,
    features: FeatureToggles,
    use_demo_data: bool,
}

impl AppConfigPatch {
    pub fn touches_theme(&self) -> bool {
        self.theme.is_some()
    }
}

/// Replacement of one whole named section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "camelCase")]
pub enum SectionUpdate {
    Theme(ThemeSettings),
    Regional(RegionalSettings),
    Features(FeatureToggles),
    PaymentGateways(PaymentGateways),
}

impl SectionUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            SectionUpdate::Theme(_) => "theme",
            SectionUpdate::Regional(_) => "regional",
            SectionUpdate::Features(_) => "features",
            SectionUpdate::PaymentGateways(_) => "paymentGateways",
        }
    }

    pub fn apply_to(self, base: &AppConfig) -> AppConfig {
        let mut next = base.clone();
        match self {
            SectionUpdate::Theme(theme) => next.theme = theme,
            SectionUpdate::Regional(regional) => next.set_regional(regional),
            SectionUpdate::Features(features) => next.features = features,
            SectionUpdate::PaymentGateways(gateways) => next.payment_gateways = gateways,
        }
        next
    }
}
