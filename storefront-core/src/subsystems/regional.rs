//! Region, currency and language derivation.

use kanau::processor::Processor;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use storefront_sdk::config::{AppConfig, RegionalSettings};
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

/// Switches the UI translation catalog.
pub trait Translator: Send + Sync {
    fn use_language(&self, code: &str);
}

/// Languages the storefront ships translations for.
pub const KNOWN_LANGUAGES: [(&str, &str); 5] = [
    ("ar", "العربية"),
    ("en", "English"),
    ("fr", "Français"),
    ("es", "Español"),
    ("de", "Deutsch"),
];

const RTL_LANGUAGES: [&str; 4] = ["ar", "fa", "he", "ur"];

pub fn is_known_language(code: &str) -> bool {
    KNOWN_LANGUAGES.iter().any(|(known, _)| *known == code)
}

pub fn language_direction(code: &str) -> TextDirection {
    if RTL_LANGUAGES.contains(&code) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

/// The default language if it is supported and translated, else the first
/// supported translated language, else `en`.
pub fn active_language(config: &AppConfig) -> String {
    let supported = &config.supported_languages;
    if supported.contains(&config.default_language) && is_known_language(&config.default_language)
    {
        return config.default_language.clone();
    }
    supported
        .iter()
        .find(|code| is_known_language(code))
        .cloned()
        .unwrap_or_else(|| "en".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    pub country: String,
    pub currency: String,
    pub timezone: String,
    pub date_format: String,
    pub is_rtl_region: bool,
    pub supported_languages: Vec<String>,
}

struct RegionRow {
    code: &'static str,
    country: &'static str,
    currency: &'static str,
    timezone: &'static str,
    date_format: &'static str,
    rtl: bool,
    languages: &'static [&'static str],
}

const GULF_LANGUAGES: &[&str] = &["ar", "en"];

#[rustfmt::skip]
const REGIONS: &[RegionRow] = &[
    RegionRow { code: "US", country: "United States", currency: "USD", timezone: "America/New_York", date_format: "MM/dd/yyyy", rtl: false, languages: &["en", "es"] },
    RegionRow { code: "SA", country: "Saudi Arabia", currency: "SAR", timezone: "Asia/Riyadh", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "AE", country: "United Arab Emirates", currency: "AED", timezone: "Asia/Dubai", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "QA", country: "Qatar", currency: "QAR", timezone: "Asia/Qatar", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "KW", country: "Kuwait", currency: "KWD", timezone: "Asia/Kuwait", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "BH", country: "Bahrain", currency: "BHD", timezone: "Asia/Bahrain", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "OM", country: "Oman", currency: "OMR", timezone: "Asia/Muscat", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "JO", country: "Jordan", currency: "JOD", timezone: "Asia/Amman", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "EG", country: "Egypt", currency: "EGP", timezone: "Africa/Cairo", date_format: "dd/MM/yyyy", rtl: true, languages: GULF_LANGUAGES },
    RegionRow { code: "GB", country: "United Kingdom", currency: "GBP", timezone: "Europe/London", date_format: "dd/MM/yyyy", rtl: false, languages: &["en"] },
    RegionRow { code: "DE", country: "Germany", currency: "EUR", timezone: "Europe/Berlin", date_format: "dd.MM.yyyy", rtl: false, languages: &["de", "en"] },
    RegionRow { code: "FR", country: "France", currency: "EUR", timezone: "Europe/Paris", date_format: "dd/MM/yyyy", rtl: false, languages: &["fr", "en"] },
    RegionRow { code: "ES", country: "Spain", currency: "EUR", timezone: "Europe/Madrid", date_format: "dd/MM/yyyy", rtl: false, languages: &["es", "en"] },
];

/// Country codes with a built-in region profile.
pub fn known_regions() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|row| row.code)
}

pub fn region_info(country_code: &str) -> Option<RegionInfo> {
    REGIONS
        .iter()
        .find(|row| row.code == country_code)
        .map(|row| RegionInfo {
            country: row.country.to_string(),
            currency: row.currency.to_string(),
            timezone: row.timezone.to_string(),
            date_format: row.date_format.to_string(),
            is_rtl_region: row.rtl,
            supported_languages: row.languages.iter().map(|s| s.to_string()).collect(),
        })
}

/// Region profile for the configured country, or one built from the config
/// itself when the country is not in the table.
pub fn resolve_region(settings: &RegionalSettings) -> RegionInfo {
    region_info(&settings.country_code).unwrap_or_else(|| RegionInfo {
        country: "Unknown".to_string(),
        currency: settings.default_currency.clone(),
        timezone: settings.timezone.clone(),
        date_format: settings.date_format.clone(),
        is_rtl_region: language_direction(&settings.default_language) == TextDirection::Rtl,
        supported_languages: settings.supported_languages.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub position: SymbolPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl_position: Option<SymbolPosition>,
}

#[rustfmt::skip]
const CURRENCIES: &[(&str, &str, &str, SymbolPosition, Option<SymbolPosition>)] = &[
    ("USD", "$", "US Dollar", SymbolPosition::Before, None),
    ("EUR", "€", "Euro", SymbolPosition::Before, None),
    ("GBP", "£", "British Pound", SymbolPosition::Before, None),
    ("SAR", "ر.س", "Saudi Riyal", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("AED", "د.إ", "UAE Dirham", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("QAR", "ر.ق", "Qatari Riyal", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("KWD", "د.ك", "Kuwaiti Dinar", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("BHD", "د.ب", "Bahraini Dinar", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("OMR", "ر.ع", "Omani Rial", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("JOD", "د.أ", "Jordanian Dinar", SymbolPosition::After, Some(SymbolPosition::Before)),
    ("EGP", "ج.م", "Egyptian Pound", SymbolPosition::After, Some(SymbolPosition::Before)),
];

/// Currency details; unknown codes use the code itself as symbol, placed
/// before the amount.
pub fn currency_info(code: &str) -> CurrencyInfo {
    match CURRENCIES.iter().find(|row| row.0 == code) {
        Some(&(code, symbol, name, position, rtl_position)) => CurrencyInfo {
            code: code.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            position,
            rtl_position,
        },
        None => CurrencyInfo {
            code: code.to_string(),
            symbol: code.to_string(),
            name: code.to_string(),
            position: SymbolPosition::Before,
            rtl_position: None,
        },
    }
}

/// Two decimals with `,` thousands grouping.
pub fn format_number(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalState {
    pub settings: RegionalSettings,
    pub region: RegionInfo,
    pub currency: CurrencyInfo,
    pub active_language: String,
    pub direction: TextDirection,
}

impl RegionalState {
    pub fn derive(config: &AppConfig) -> Self {
        let settings = config.regional();
        let active_language = active_language(config);
        Self {
            region: resolve_region(&settings),
            currency: currency_info(&settings.default_currency),
            direction: language_direction(&active_language),
            active_language,
            settings,
        }
    }

    pub fn calculate_tax(&self, amount: f64) -> f64 {
        amount * self.settings.tax_rate
    }

    pub fn shipping_enabled(&self) -> bool {
        self.settings.shipping_enabled
    }

    /// Format `amount` in `currency` (the default currency when `None`).
    ///
    /// In right-to-left context the currency's RTL symbol position applies.
    pub fn format_currency(&self, amount: f64, currency: Option<&str>) -> String {
        let info = match currency {
            Some(code) => currency_info(code),
            None => self.currency.clone(),
        };
        let position = match (self.direction, info.rtl_position) {
            (TextDirection::Rtl, Some(rtl)) => rtl,
            _ => info.position,
        };
        let amount = format_number(amount);
        match position {
            SymbolPosition::Before => format!("{} {amount}", info.symbol),
            SymbolPosition::After => format!("{amount} {}", info.symbol),
        }
    }
}

/// Publishes the derived [`RegionalState`] and keeps the translator on the
/// active language.
pub struct RegionalSubsystem {
    state_tx: watch::Sender<Option<Arc<RegionalState>>>,
    translator: Option<Arc<dyn Translator>>,
}

impl RegionalSubsystem {
    pub fn new(translator: Option<Arc<dyn Translator>>) -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            state_tx,
            translator,
        }
    }

    pub fn state(&self) -> Option<Arc<RegionalState>> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<Option<Arc<RegionalState>>> {
        self.state_tx.subscribe()
    }
}

impl Processor<Arc<AppConfig>> for RegionalSubsystem {
    type Output = ();
    type Error = Infallible;

    async fn process(&self, config: Arc<AppConfig>) -> Result<(), Infallible> {
        let state = RegionalState::derive(&config);
        let previous_language = self
            .state_tx
            .borrow()
            .as_ref()
            .map(|s| s.active_language.clone());

        if previous_language.as_deref() != Some(state.active_language.as_str()) {
            info!(language = %state.active_language, "Active language changed");
            if let Some(translator) = &self.translator {
                translator.use_language(&state.active_language);
            }
        }
        debug!(country = %state.settings.country_code, currency = %state.currency.code, "Regional state derived");
        self.state_tx.send_replace(Some(Arc::new(state)));
        Ok(())
    }
}
