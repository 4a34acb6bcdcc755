//! Payment gateway selection.

use kanau::processor::Processor;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use storefront_sdk::config::{AppConfig, PaymentGatewayId};
use tokio::sync::watch;
use tracing::debug;

/// Matches every currency or country.
const ANY: &[&str] = &["*"];

/// Built-in description of a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayInfo {
    pub id: PaymentGatewayId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub supported_currencies: &'static [&'static str],
    pub supported_countries: &'static [&'static str],
    /// Percentage of the amount.
    pub processing_fee: f64,
}

impl GatewayInfo {
    pub fn supports_currency(&self, currency: &str) -> bool {
        self.supported_currencies == ANY || self.supported_currencies.contains(&currency)
    }

    pub fn supports_country(&self, country: &str) -> bool {
        self.supported_countries == ANY || self.supported_countries.contains(&country)
    }
}

pub static GATEWAY_CATALOG: [GatewayInfo; 5] = [
    GatewayInfo {
        id: PaymentGatewayId::Cod,
        display_name: "Cash on Delivery",
        description: "Pay in cash when the order is delivered",
        supported_currencies: ANY,
        supported_countries: ANY,
        processing_fee: 0.0,
    },
    GatewayInfo {
        id: PaymentGatewayId::Stripe,
        display_name: "Stripe",
        description: "Global payment processing with support for 40+ currencies",
        supported_currencies: &[
            "USD", "EUR", "GBP", "CAD", "AUD", "JPY", "CHF", "NOK", "SEK", "DKK", "SAR", "AED",
        ],
        supported_countries: &[
            "US", "CA", "GB", "AU", "NZ", "SG", "HK", "JP", "IE", "AT", "BE", "DK", "FI", "FR",
            "DE", "IT", "LU", "NL", "NO", "PT", "ES", "SE", "CH",
        ],
        processing_fee: 2.9,
    },
    GatewayInfo {
        id: PaymentGatewayId::Paypal,
        display_name: "PayPal",
        description: "Worldwide payment solution with buyer protection",
        supported_currencies: &[
            "USD", "EUR", "GBP", "CAD", "AUD", "JPY", "CHF", "NOK", "SEK", "DKK", "PLN", "CZK",
            "HUF", "ILS", "MXN", "BRL", "TWD", "THB", "SGD", "HKD", "NZD", "PHP", "MYR", "INR",
            "RUB",
        ],
        supported_countries: &[
            "US", "CA", "GB", "AU", "NZ", "SG", "HK", "JP", "KR", "TW", "TH", "MY", "PH", "IN",
            "IE", "AT", "BE", "DK", "FI", "FR", "DE", "IT", "LU", "NL", "NO", "PT", "ES", "SE",
            "CH", "PL", "CZ", "HU", "IL", "MX", "BR", "RU",
        ],
        processing_fee: 3.49,
    },
    GatewayInfo {
        id: PaymentGatewayId::Moyasar,
        display_name: "Moyasar",
        description: "Leading payment gateway for Middle East with local payment methods",
        supported_currencies: &["SAR", "AED", "KWD", "BHD", "QAR", "OMR", "USD", "EUR"],
        supported_countries: &["SA", "AE", "KW", "BH", "QA", "OM"],
        processing_fee: 2.9,
    },
    GatewayInfo {
        id: PaymentGatewayId::Stcpay,
        display_name: "STC Pay",
        description: "Digital wallet solution for Saudi Arabia",
        supported_currencies: &["SAR"],
        supported_countries: &["SA"],
        processing_fee: 2.5,
    },
];

pub fn gateway_info(id: PaymentGatewayId) -> &'static GatewayInfo {
    match id {
        PaymentGatewayId::Cod => &GATEWAY_CATALOG[0],
        PaymentGatewayId::Stripe => &GATEWAY_CATALOG[1],
        PaymentGatewayId::Paypal => &GATEWAY_CATALOG[2],
        PaymentGatewayId::Moyasar => &GATEWAY_CATALOG[3],
        PaymentGatewayId::Stcpay => &GATEWAY_CATALOG[4],
    }
}

/// Estimated processing fee for `amount`, rounded to two decimals.
pub fn estimate_fee(gateway: PaymentGatewayId, amount: f64, currency: &str) -> f64 {
    let fee = match gateway {
        PaymentGatewayId::Cod => 0.0,
        PaymentGatewayId::Stripe => {
            amount * 0.029
                + match currency {
                    "USD" => 0.30,
                    "EUR" => 0.25,
                    "GBP" => 0.20,
                    _ => 0.0,
                }
        }
        PaymentGatewayId::Paypal => {
            amount * 0.0349
                + match currency {
                    "USD" => 0.49,
                    "EUR" => 0.35,
                    "GBP" => 0.30,
                    _ => 0.0,
                }
        }
        PaymentGatewayId::Moyasar => match currency {
            "SAR" | "USD" => amount * 0.029,
            "AED" => amount * 0.035,
            _ => 0.0,
        },
        PaymentGatewayId::Stcpay => amount * 0.025,
    };
    (fee * 100.0).round() / 100.0
}

/// Gateways tried first, in order, when recommending one for a country.
fn regional_preference(country: &str) -> &'static [PaymentGatewayId] {
    use PaymentGatewayId::*;
    match country {
        "SA" | "AE" | "KW" | "QA" | "BH" | "OM" => &[Moyasar, Stripe, Paypal],
        _ => &[Stripe, Paypal],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    #[serde(flatten)]
    pub info: GatewayInfo,
    /// Effective credentials carry what the gateway needs.
    pub configured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    /// Enabled gateways in configured order.
    pub gateways: Vec<GatewayStatus>,
    pub checkout_configured: bool,
    pub allow_demo_checkout: bool,
    pub currency: String,
    pub country_code: String,
}

impl PaymentState {
    pub fn derive(config: &AppConfig) -> Self {
        let gateways: Vec<GatewayStatus> = config
            .enabled_payment_gateways
            .iter()
            .map(|&id| GatewayStatus {
                info: *gateway_info(id),
                configured: config
                    .gateway_credentials(id)
                    .is_none_or(|credentials| credentials.is_configured()),
            })
            .collect();
        Self {
            checkout_configured: gateways.iter().any(|g| g.configured),
            gateways,
            allow_demo_checkout: config.allow_demo_checkout,
            currency: config.default_currency.clone(),
            country_code: config.country_code.clone(),
        }
    }

    pub fn is_enabled(&self, id: PaymentGatewayId) -> bool {
        self.gateways.iter().any(|g| g.info.id == id)
    }

    /// Enabled gateways supporting both `currency` and `country`, cheapest
    /// first.
    pub fn gateways_for_region(&self, currency: &str, country: &str) -> Vec<&GatewayStatus> {
        let mut matching: Vec<&GatewayStatus> = self
            .gateways
            .iter()
            .filter(|g| g.info.supports_currency(currency) && g.info.supports_country(country))
            .collect();
        matching.sort_by(|a, b| a.info.processing_fee.total_cmp(&b.info.processing_fee));
        matching
    }

    /// The regionally preferred gateway among those available, else the
    /// cheapest available one.
    pub fn recommended_gateway(&self, currency: &str, country: &str) -> Option<PaymentGatewayId> {
        let available = self.gateways_for_region(currency, country);
        regional_preference(country)
            .iter()
            .copied()
            .find(|preferred| available.iter().any(|g| g.info.id == *preferred))
            .or_else(|| available.first().map(|g| g.info.id))
    }
}

/// Publishes the derived [`PaymentState`].
pub struct PaymentSubsystem {
    state_tx: watch::Sender<Option<Arc<PaymentState>>>,
}

impl PaymentSubsystem {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(None);
        Self { state_tx }
    }

    pub fn state(&self) -> Option<Arc<PaymentState>> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<Option<Arc<PaymentState>>> {
        self.state_tx.subscribe()
    }
}

impl Default for PaymentSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor<Arc<AppConfig>> for PaymentSubsystem {
    type Output = ();
    type Error = Infallible;

    async fn process(&self, config: Arc<AppConfig>) -> Result<(), Infallible> {
        let state = PaymentState::derive(&config);
        debug!(
            enabled = state.gateways.len(),
            checkout_configured = state.checkout_configured,
            "Payment state derived"
        );
        self.state_tx.send_replace(Some(Arc::new(state)));
        Ok(())
    }
}
