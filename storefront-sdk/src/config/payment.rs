//! Payment gateway credential records.

use super::ids::PaymentGatewayId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaypalEnvironment {
    #[default]
    Sandbox,
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StcPayEnvironment {
    #[default]
    Test,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeCredentials {
    pub publishable_key: String,
    pub secret_key: String,
    pub webhook_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaypalCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub environment: PaypalEnvironment,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoyasarCredentials {
    pub publishable_key: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StcPayCredentials {
    pub merchant_id: String,
    pub api_key: String,
    pub environment: StcPayEnvironment,
}

/// Nested per-gateway credentials (`paymentGateways` in the config document).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentGateways {
    pub stripe: StripeCredentials,
    pub paypal: PaypalCredentials,
    pub moyasar: MoyasarCredentials,
    pub stcpay: StcPayCredentials,
}

/// Credentials for exactly one gateway.
///
/// Cash on delivery carries no credentials and has no variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gateway", content = "credentials", rename_all = "lowercase")]
pub enum GatewayCredentials {
    Stripe(StripeCredentials),
    Paypal(PaypalCredentials),
    Moyasar(MoyasarCredentials),
    Stcpay(StcPayCredentials),
}

impl GatewayCredentials {
    pub fn gateway(&self) -> PaymentGatewayId {
        match self {
            GatewayCredentials::Stripe(_) => PaymentGatewayId::Stripe,
            GatewayCredentials::Paypal(_) => PaymentGatewayId::Paypal,
            GatewayCredentials::Moyasar(_) => PaymentGatewayId::Moyasar,
            GatewayCredentials::Stcpay(_) => PaymentGatewayId::Stcpay,
        }
    }

    /// Whether the credentials carry the fields the gateway needs to start a
    /// checkout.
    pub fn is_configured(&self) -> bool {
        match self {
            GatewayCredentials::Stripe(c) => !c.publishable_key.is_empty(),
            GatewayCredentials::Paypal(c) => !c.client_id.is_empty(),
            GatewayCredentials::Moyasar(c) => !c.publishable_key.is_empty(),
            GatewayCredentials::Stcpay(c) => !c.merchant_id.is_empty() && !c.api_key.is_empty(),
        }
    }
}

/// Pick the nested value when non-empty, else the legacy flat value.
pub(crate) fn prefer_nested(nested: &str, legacy: &str) -> String {
    if nested.is_empty() {
        legacy.to_string()
    } else {
        nested.to_string()
    }
}
