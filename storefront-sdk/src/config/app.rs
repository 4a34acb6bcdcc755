//! The root settings document.

use super::features::FeatureToggles;
use super::ids::{
    PaymentGatewayId, SmsProviderId, dedup_preserving_order, lenient_id_list, lenient_optional_id,
};
use super::payment::{
    GatewayCredentials, MoyasarCredentials, PaymentGateways, PaypalCredentials, StcPayCredentials,
    StripeCredentials, prefer_nested,
};
use super::regional::RegionalSettings;
use super::sms::{
    AwsSnsConfig, FirebaseConfig, MessageBirdConfig, SmsCredentials, TaqnyatConfig, TwilioConfig,
    VonageConfig,
};
use super::theme::ThemeSettings;
use serde::{Deserialize, Serialize};

/// Schema revision written by this version of the client.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// The complete storefront configuration.
///
/// Serialized as one flat camelCase JSON object. Every field has a default,
/// so a document missing fields is backfilled from [`default_config`] when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Documents written before versioning carry no `schemaVersion` and
    /// read as revision 1.
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,

    // -- Identity / branding --
    pub name: String,
    pub version: String,
    pub app_name: String,
    pub app_slogan: String,
    pub store_description: String,
    pub logo_url: String,
    pub splash_screen_url: String,

    // -- Store / API --
    pub store_url: String,
    pub api_url: String,
    pub wordpress_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub auth_code: String,
    pub jwt_auth_url: String,
    pub auth_token: String,

    // -- Theme --
    pub theme: ThemeSettings,

    // -- Regional (flat for backward compatibility) --
    pub default_currency: String,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub country_code: String,
    pub timezone: String,
    pub date_format: String,
    pub tax_rate: f64,
    pub shipping_enabled: bool,

    // -- Payment --
    #[serde(deserialize_with = "lenient_id_list")]
    pub enabled_payment_gateways: Vec<PaymentGatewayId>,
    pub allow_demo_checkout: bool,
    pub payment_gateways: PaymentGateways,
    pub stripe_publishable_key: String,
    pub stripe_secret_key: String,
    pub paypal_client_id: String,
    pub paypal_client_secret: String,
    pub moyasar_publishable_key: String,
    pub moyasar_secret_key: String,

    // -- SMS --
    #[serde(deserialize_with = "lenient_id_list")]
    pub sms_providers: Vec<SmsProviderId>,
    #[serde(deserialize_with = "lenient_optional_id")]
    pub default_sms_provider: Option<SmsProviderId>,
    pub twilio_config: TwilioConfig,
    pub firebase_config: FirebaseConfig,
    pub message_bird_config: MessageBirdConfig,
    pub vonage_config: VonageConfig,
    pub aws_config: AwsSnsConfig,
    pub taqnyat_config: TaqnyatConfig,
    pub taqnyat_api_key: String,
    pub taqnyat_sender: String,

    // -- Notifications --
    pub one_signal_app_id: String,

    // -- Features --
    pub features: FeatureToggles,

    // -- Demo / dev --
    pub use_demo_data: bool,
}

fn legacy_schema_version() -> u32 {
    1
}

/// The one member whose `null` means something other than "absent".
const NULLABLE_MEMBER: &str = "defaultSmsProvider";

impl AppConfig {
    /// Deserialize a stored or imported document. `null` members read as
    /// absent and take their defaults, except `defaultSmsProvider`, where
    /// `null` means no default provider.
    pub fn from_json_value(mut value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if let serde_json::Value::Object(members) = &mut value {
            members.retain(|key, member| key == NULLABLE_MEMBER || !member.is_null());
            members.values_mut().for_each(drop_null_members);
        }
        serde_json::from_value(value)
    }
}

fn drop_null_members(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(drop_null_members);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(drop_null_members),
        _ => {}
    }
}

/// The hard-coded profile covering every recognized setting.
pub fn default_config() -> AppConfig {
    AppConfig {
        schema_version: CURRENT_SCHEMA_VERSION,

        name: "Your Store Name".to_string(),
        version: "1.0.0".to_string(),
        app_name: "Your App Name".to_string(),
        app_slogan: "Your App Slogan".to_string(),
        store_description: "Your Store Description".to_string(),
        logo_url: "assets/logo.png".to_string(),
        splash_screen_url: "assets/splash.png".to_string(),

        store_url: "https://your-store.com".to_string(),
        api_url: "https://your-store.com/wp-json/wc/v3".to_string(),
        wordpress_url: "https://your-store.com".to_string(),
        consumer_key: String::new(),
        consumer_secret: String::new(),
        auth_code: String::new(),
        jwt_auth_url: "https://your-store.com/wp-json/simple-jwt-login/v1".to_string(),
        auth_token: String::new(),

        theme: ThemeSettings::default(),

        default_currency: "USD".to_string(),
        default_language: "en".to_string(),
        supported_languages: ["en", "ar", "es", "fr", "de"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        country_code: "US".to_string(),
        timezone: "America/New_York".to_string(),
        date_format: "MM/DD/YYYY".to_string(),
        tax_rate: 0.0,
        shipping_enabled: true,

        enabled_payment_gateways: vec![PaymentGatewayId::Cod, PaymentGatewayId::Moyasar],
        allow_demo_checkout: false,
        payment_gateways: PaymentGateways::default(),
        stripe_publishable_key: String::new(),
        stripe_secret_key: String::new(),
        paypal_client_id: String::new(),
        paypal_client_secret: String::new(),
        moyasar_publishable_key: String::new(),
        moyasar_secret_key: String::new(),

        sms_providers: vec![SmsProviderId::Twilio],
        default_sms_provider: Some(SmsProviderId::Twilio),
        twilio_config: TwilioConfig::default(),
        firebase_config: FirebaseConfig::default(),
        message_bird_config: MessageBirdConfig::default(),
        vonage_config: VonageConfig::default(),
        aws_config: AwsSnsConfig::default(),
        taqnyat_config: TaqnyatConfig::default(),
        taqnyat_api_key: String::new(),
        taqnyat_sender: String::new(),

        one_signal_app_id: String::new(),

        features: FeatureToggles::default(),

        use_demo_data: false,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

impl AppConfig {
    /// Grouped view of the flat regional fields.
    pub fn regional(&self) -> RegionalSettings {
        RegionalSettings {
            default_currency: self.default_currency.clone(),
            default_language: self.default_language.clone(),
            supported_languages: self.supported_languages.clone(),
            country_code: self.country_code.clone(),
            timezone: self.timezone.clone(),
            date_format: self.date_format.clone(),
            tax_rate: self.tax_rate,
            shipping_enabled: self.shipping_enabled,
        }
    }

    pub fn set_regional(&mut self, regional: RegionalSettings) {
        self.default_currency = regional.default_currency;
        self.default_language = regional.default_language;
        self.supported_languages = regional.supported_languages;
        self.country_code = regional.country_code;
        self.timezone = regional.timezone;
        self.date_format = regional.date_format;
        self.tax_rate = regional.tax_rate;
        self.shipping_enabled = regional.shipping_enabled;
    }

    /// Effective Stripe credentials: nested value if non-empty, else the
    /// legacy flat field, else empty.
    pub fn stripe_credentials(&self) -> StripeCredentials {
        let nested = &self.payment_gateways.stripe;
        StripeCredentials {
            publishable_key: prefer_nested(&nested.publishable_key, &self.stripe_publishable_key),
            secret_key: prefer_nested(&nested.secret_key, &self.stripe_secret_key),
            webhook_secret: nested.webhook_secret.clone(),
        }
    }

    pub fn paypal_credentials(&self) -> PaypalCredentials {
        let nested = &self.payment_gateways.paypal;
        PaypalCredentials {
            client_id: prefer_nested(&nested.client_id, &self.paypal_client_id),
            client_secret: prefer_nested(&nested.client_secret, &self.paypal_client_secret),
            environment: nested.environment,
        }
    }

    pub fn moyasar_credentials(&self) -> MoyasarCredentials {
        let nested = &self.payment_gateways.moyasar;
        MoyasarCredentials {
            publishable_key: prefer_nested(&nested.publishable_key, &self.moyasar_publishable_key),
            secret_key: prefer_nested(&nested.secret_key, &self.moyasar_secret_key),
        }
    }

    pub fn stcpay_credentials(&self) -> StcPayCredentials {
        self.payment_gateways.stcpay.clone()
    }

    /// Effective credentials for a gateway; `None` for cash on delivery.
    pub fn gateway_credentials(&self, gateway: PaymentGatewayId) -> Option<GatewayCredentials> {
        match gateway {
            PaymentGatewayId::Cod => None,
            PaymentGatewayId::Stripe => Some(GatewayCredentials::Stripe(self.stripe_credentials())),
            PaymentGatewayId::Paypal => Some(GatewayCredentials::Paypal(self.paypal_credentials())),
            PaymentGatewayId::Moyasar => {
                Some(GatewayCredentials::Moyasar(self.moyasar_credentials()))
            }
            PaymentGatewayId::Stcpay => Some(GatewayCredentials::Stcpay(self.stcpay_credentials())),
        }
    }

    /// Store credentials for one gateway and refresh its legacy flat copies.
    pub fn set_gateway_credentials(&mut self, credentials: GatewayCredentials) {
        match credentials {
            GatewayCredentials::Stripe(c) => {
                self.stripe_publishable_key = c.publishable_key.clone();
                self.stripe_secret_key = c.secret_key.clone();
                self.payment_gateways.stripe = c;
            }
            GatewayCredentials::Paypal(c) => {
                self.paypal_client_id = c.client_id.clone();
                self.paypal_client_secret = c.client_secret.clone();
                self.payment_gateways.paypal = c;
            }
            GatewayCredentials::Moyasar(c) => {
                self.moyasar_publishable_key = c.publishable_key.clone();
                self.moyasar_secret_key = c.secret_key.clone();
                self.payment_gateways.moyasar = c;
            }
            GatewayCredentials::Stcpay(c) => {
                self.payment_gateways.stcpay = c;
            }
        }
    }

    /// Effective credentials for an SMS provider.
    pub fn sms_credentials(&self, provider: SmsProviderId) -> SmsCredentials {
        match provider {
            SmsProviderId::Twilio => SmsCredentials::Twilio(self.twilio_config.clone()),
            SmsProviderId::Firebase => SmsCredentials::Firebase(self.firebase_config.clone()),
            SmsProviderId::MessageBird => {
                SmsCredentials::MessageBird(self.message_bird_config.clone())
            }
            SmsProviderId::Vonage => SmsCredentials::Vonage(self.vonage_config.clone()),
            SmsProviderId::AwsSns => SmsCredentials::AwsSns(self.aws_config.clone()),
            SmsProviderId::Taqnyat => SmsCredentials::Taqnyat(TaqnyatConfig {
                api_key: prefer_nested(&self.taqnyat_config.api_key, &self.taqnyat_api_key),
                sender: prefer_nested(&self.taqnyat_config.sender, &self.taqnyat_sender),
            }),
        }
    }

    pub fn set_sms_credentials(&mut self, credentials: SmsCredentials) {
        match credentials {
            SmsCredentials::Twilio(c) => self.twilio_config = c,
            SmsCredentials::Firebase(c) => self.firebase_config = c,
            SmsCredentials::MessageBird(c) => self.message_bird_config = c,
            SmsCredentials::Vonage(c) => self.vonage_config = c,
            SmsCredentials::AwsSns(c) => self.aws_config = c,
            SmsCredentials::Taqnyat(c) => {
                self.taqnyat_api_key = c.api_key.clone();
                self.taqnyat_sender = c.sender.clone();
                self.taqnyat_config = c;
            }
        }
    }

    /// Deduplicate id lists and fill in missing known feature toggles.
    pub fn normalized(mut self) -> AppConfig {
        self.enabled_payment_gateways = dedup_preserving_order(&self.enabled_payment_gateways);
        self.sms_providers = dedup_preserving_order(&self.sms_providers);
        self.features = self.features.backfilled();
        self
    }
}
