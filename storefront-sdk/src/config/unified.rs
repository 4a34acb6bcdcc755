//! The nested "unified" config asset shipped alongside the client.
//!
//! Every group and every field is optional; the core transform fills gaps
//! from the default profile.

use super::payment::{MoyasarCredentials, PaypalCredentials, StcPayCredentials, StripeCredentials};
use super::sms::{
    AwsSnsConfig, FirebaseConfig, MessageBirdConfig, TaqnyatConfig, TwilioConfig, VonageConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedConfigDocument {
    pub app: Option<AppGroup>,
    pub store: Option<StoreGroup>,
    pub theme: Option<ThemeGroup>,
    pub regional: Option<RegionalGroup>,
    pub payment: Option<PaymentGroup>,
    pub sms: Option<SmsGroup>,
    pub notifications: Option<NotificationsGroup>,
    pub features: Option<BTreeMap<String, bool>>,
    pub development: Option<DevelopmentGroup>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppGroup {
    pub name: Option<String>,
    pub version: Option<String>,
    pub app_name: Option<String>,
    pub app_slogan: Option<String>,
    pub store_description: Option<String>,
    pub logo_url: Option<String>,
    pub splash_screen_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreGroup {
    pub store_url: Option<String>,
    pub api_url: Option<String>,
    pub wordpress_url: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub auth_code: Option<String>,
    pub jwt_auth_url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeGroup {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionalGroup {
    pub default_currency: Option<String>,
    pub default_language: Option<String>,
    pub supported_languages: Option<Vec<String>>,
    pub country_code: Option<String>,
    pub timezone: Option<String>,
    pub date_format: Option<String>,
    pub tax_rate: Option<f64>,
    pub shipping_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentGroup {
    pub gateways: Option<GatewaysGroup>,
    /// Raw ids; unknown entries are dropped during the transform.
    pub enabled_payment_gateways: Option<Vec<String>>,
    pub allow_demo_checkout: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaysGroup {
    pub stripe: Option<StripeCredentials>,
    pub paypal: Option<PaypalCredentials>,
    pub moyasar: Option<MoyasarCredentials>,
    pub stcpay: Option<StcPayCredentials>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsGroup {
    /// Raw ids of the enabled providers.
    pub enabled: Option<Vec<String>>,
    pub default_provider: Option<String>,
    pub providers: Option<SmsProvidersGroup>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsProvidersGroup {
    pub twilio: Option<TwilioConfig>,
    pub firebase: Option<FirebaseConfig>,
    #[serde(alias = "messageBird")]
    pub messagebird: Option<MessageBirdConfig>,
    pub vonage: Option<VonageConfig>,
    #[serde(alias = "aws")]
    pub aws_sns: Option<AwsSnsConfig>,
    pub taqnyat: Option<TaqnyatConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationsGroup {
    pub one_signal_app_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevelopmentGroup {
    pub use_demo_data: Option<bool>,
}
