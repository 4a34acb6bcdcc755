//! Upgrades of documents written by older clients.
//!
//! Missing fields are backfilled by the serde defaults of [`AppConfig`];
//! this module only handles what defaults cannot express.

use storefront_sdk::config::{AppConfig, CURRENT_SCHEMA_VERSION};
use tracing::{debug, info};

/// Parse a stored document and bring it up to the current schema.
pub fn parse_and_migrate(raw: &str) -> Result<AppConfig, serde_json::Error> {
    let config = AppConfig::from_json_value(serde_json::from_str(raw)?)?;
    Ok(migrate(config))
}

/// Bring `config` up to [`CURRENT_SCHEMA_VERSION`].
pub fn migrate(mut config: AppConfig) -> AppConfig {
    if config.schema_version >= CURRENT_SCHEMA_VERSION {
        return config.normalized();
    }

    let from = config.schema_version;
    if from < 2 {
        copy_legacy_credentials(&mut config);
    }
    config.schema_version = CURRENT_SCHEMA_VERSION;
    info!(from, to = CURRENT_SCHEMA_VERSION, "Migrated stored config");
    config.normalized()
}

/// Version 1 kept gateway credentials only in flat top-level keys. Copy them
/// into nested credentials that are still empty.
fn copy_legacy_credentials(config: &mut AppConfig) {
    let mut copied = 0usize;
    let mut fill = |nested: &mut String, legacy: &str| {
        if nested.is_empty() && !legacy.is_empty() {
            *nested = legacy.to_string();
            copied += 1;
        }
    };

    let gateways = &mut config.payment_gateways;
    fill(
        &mut gateways.stripe.publishable_key,
        &config.stripe_publishable_key,
    );
    fill(&mut gateways.stripe.secret_key, &config.stripe_secret_key);
    fill(&mut gateways.paypal.client_id, &config.paypal_client_id);
    fill(
        &mut gateways.paypal.client_secret,
        &config.paypal_client_secret,
    );
    fill(
        &mut gateways.moyasar.publishable_key,
        &config.moyasar_publishable_key,
    );
    fill(&mut gateways.moyasar.secret_key, &config.moyasar_secret_key);
    fill(&mut config.taqnyat_config.api_key, &config.taqnyat_api_key);
    fill(&mut config.taqnyat_config.sender, &config.taqnyat_sender);

    debug!(copied, "Copied legacy flat credentials into nested records");
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_sdk::config::{SmsProviderId, default_config};

    #[test]
    fn test_legacy_blob_is_backfilled_and_upgraded() {
        let raw = r#"{
            "appName": "Legacy Shop",
            "storeUrl": "https://legacy.example",
            "stripePublishableKey": "pk_old",
            "moyasarSecretKey": "sk_moy",
            "taqnyatApiKey": "tq",
            "smsProviders": ["aws", "messageBird", "aws"],
            "defaultSmsProvider": "aws"
        }"#;
        let config = parse_and_migrate(raw).unwrap();

        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(config.app_name, "Legacy Shop");
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.payment_gateways.stripe.publishable_key, "pk_old");
        assert_eq!(config.payment_gateways.moyasar.secret_key, "sk_moy");
        assert_eq!(config.taqnyat_config.api_key, "tq");
        assert_eq!(
            config.sms_providers,
            vec![SmsProviderId::AwsSns, SmsProviderId::MessageBird]
        );
        assert_eq!(config.default_sms_provider, Some(SmsProviderId::AwsSns));
    }

    #[test]
    fn test_nested_credentials_are_not_overwritten() {
        let raw = r#"{
            "schemaVersion": 1,
            "paypalClientId": "legacy",
            "paymentGateways": { "paypal": { "clientId": "nested" } }
        }"#;
        let config = parse_and_migrate(raw).unwrap();
        assert_eq!(config.payment_gateways.paypal.client_id, "nested");
    }

    #[test]
    fn test_current_documents_pass_through() {
        let mut config = default_config();
        config.stripe_publishable_key = "flat-only".to_string();
        let migrated = migrate(config.clone());
        assert_eq!(migrated, config);
    }

    #[test]
    fn test_explicit_nulls_are_backfilled() {
        let raw = r#"{
            "schemaVersion": 1,
            "appName": "Null Shop",
            "taxRate": null,
            "smsProviders": null,
            "paymentGateways": { "stripe": null }
        }"#;
        let config = parse_and_migrate(raw).unwrap();
        let defaults = default_config();
        assert_eq!(config.app_name, "Null Shop");
        assert_eq!(config.tax_rate, defaults.tax_rate);
        assert_eq!(config.sms_providers, defaults.sms_providers);
        assert_eq!(config.payment_gateways.stripe, defaults.payment_gateways.stripe);
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        assert!(parse_and_migrate("{not json").is_err());
    }
}
