use storefront_sdk::config::AppConfig;
use storefront_sdk::objects::{ValidationIssue, ValidationReport, ValidationWarning};

/// Check the required settings of `config`. Never fails; problems are
/// reported as data.
pub fn validate(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    let required = [
        (&config.store_url, ValidationIssue::MissingStoreUrl),
        (&config.api_url, ValidationIssue::MissingApiUrl),
        (&config.consumer_key, ValidationIssue::MissingConsumerKey),
        (&config.consumer_secret, ValidationIssue::MissingConsumerSecret),
    ];
    for (value, issue) in required {
        if value.trim().is_empty() {
            report.errors.push(issue);
        }
    }
    if config.enabled_payment_gateways.is_empty() {
        report.errors.push(ValidationIssue::NoPaymentGatewayEnabled);
    }

    if !config
        .supported_languages
        .iter()
        .any(|lang| lang == &config.default_language)
    {
        report.warnings.push(ValidationWarning::DefaultLanguageNotSupported(
            config.default_language.clone(),
        ));
    }
    if let Some(provider) = config.default_sms_provider {
        if !config.sms_providers.contains(&provider) {
            report
                .warnings
                .push(ValidationWarning::DefaultSmsProviderNotEnabled(provider));
        }
    }
    if !(0.0..=1.0).contains(&config.tax_rate) {
        report
            .warnings
            .push(ValidationWarning::TaxRateOutOfRange(config.tax_rate));
    }
    for (field, value) in [
        ("primaryColor", &config.theme.primary_color),
        ("secondaryColor", &config.theme.secondary_color),
    ] {
        if !is_hex_color(value) {
            report.warnings.push(ValidationWarning::InvalidColor {
                field,
                value: value.clone(),
            });
        }
    }

    report
}

/// `#rrggbb`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_sdk::config::{SmsProviderId, default_config};

    fn complete_config() -> AppConfig {
        let mut config = default_config();
        config.consumer_key = "ck".to_string();
        config.consumer_secret = "cs".to_string();
        config
    }

    #[test]
    fn test_fresh_default_lacks_credentials() {
        let report = validate(&default_config());
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![
                ValidationIssue::MissingConsumerKey,
                ValidationIssue::MissingConsumerSecret
            ]
        );
    }

    #[test]
    fn test_complete_config_is_valid() {
        let report = validate(&complete_config());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_gateways_is_an_error() {
        let mut config = complete_config();
        config.enabled_payment_gateways.clear();
        let report = validate(&config);
        assert_eq!(report.errors, vec![ValidationIssue::NoPaymentGatewayEnabled]);
        assert_eq!(
            report.errors[0].to_string(),
            "At least one payment gateway must be enabled"
        );
    }

    #[test]
    fn test_membership_checks_are_warnings() {
        let mut config = complete_config();
        config.default_language = "ja".to_string();
        config.default_sms_provider = Some(SmsProviderId::Vonage);
        config.tax_rate = 15.0;
        config.theme.primary_color = "yellow".to_string();

        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 4);
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#ffD60a"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("ffd60a0"));
        assert!(!is_hex_color("#ggg000"));
    }
}
