//! Regional section.
//!
//! The config document keeps regional settings as flat top-level fields for
//! backward compatibility; [`RegionalSettings`] is the grouped view used by
//! section updates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalSettings {
    pub default_currency: String,
    pub default_language: String,
    /// Ordered list; the first entry is not guaranteed to be the fallback.
    pub supported_languages: Vec<String>,
    pub country_code: String,
    pub timezone: String,
    pub date_format: String,
    /// Fraction between 0.0 and 1.0.
    pub tax_rate: f64,
    pub shipping_enabled: bool,
}

/// Partial regional change. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_enabled: Option<bool>,
}

impl RegionalSettings {
    pub fn merged(&self, patch: RegionalPatch) -> RegionalSettings {
        RegionalSettings {
            default_currency: patch
                .default_currency
                .unwrap_or_else(|| self.default_currency.clone()),
            default_language: patch
                .default_language
                .unwrap_or_else(|| self.default_language.clone()),
            supported_languages: patch
                .supported_languages
                .unwrap_or_else(|| self.supported_languages.clone()),
            country_code: patch
                .country_code
                .unwrap_or_else(|| self.country_code.clone()),
            timezone: patch.timezone.unwrap_or_else(|| self.timezone.clone()),
            date_format: patch
                .date_format
                .unwrap_or_else(|| self.date_format.clone()),
            tax_rate: patch.tax_rate.unwrap_or(self.tax_rate),
            shipping_enabled: patch.shipping_enabled.unwrap_or(self.shipping_enabled),
        }
    }
}
