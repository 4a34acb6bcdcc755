//! Remote unified config: retrieval and conversion to the flat schema.

use super::error::FetchError;
use async_trait::async_trait;
use storefront_sdk::config::unified::{
    AppGroup, DevelopmentGroup, GatewaysGroup, NotificationsGroup, PaymentGroup, RegionalGroup,
    SmsGroup, SmsProvidersGroup, StoreGroup, ThemeGroup,
};
use storefront_sdk::config::{
    AppConfig, FeatureToggles, PaymentGatewayId, SmsProviderId, UnifiedConfigDocument,
    default_config, parse_id_list,
};
use tracing::debug;
use url::Url;

/// Default path of the unified config asset, relative to the base URL.
pub const DEFAULT_UNIFIED_CONFIG_PATH: &str = "assets/config/unified-config.json";

/// Retrieves the nested unified config document.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<UnifiedConfigDocument, FetchError>;
}

/// Fetcher used when no remote source is configured. Always fails, so the
/// resolver falls through to the default profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRemoteConfig;

#[async_trait]
impl ConfigFetcher for NoRemoteConfig {
    async fn fetch(&self, _path: &str) -> Result<UnifiedConfigDocument, FetchError> {
        Err(FetchError::Network("no remote config source configured".to_string()))
    }
}

/// `GET {base_url}/{path}` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfigFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpConfigFetcher {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::Network(format!("invalid config path {path:?}: {e}")))
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch(&self, path: &str) -> Result<UnifiedConfigDocument, FetchError> {
        let url = self.endpoint(path)?;
        debug!(%url, "Fetching unified config");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn take<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Convert a unified document into the flat schema.
///
/// Every absent group or field falls back to the default profile. Legacy
/// flat credential fields are filled with copies of the nested values.
pub fn transform(doc: &UnifiedConfigDocument) -> AppConfig {
    let mut config = default_config();

    if let Some(app) = &doc.app {
        take(&mut config.name, &app.name);
        take(&mut config.version, &app.version);
        take(&mut config.app_name, &app.app_name);
        take(&mut config.app_slogan, &app.app_slogan);
        take(&mut config.store_description, &app.store_description);
        take(&mut config.logo_url, &app.logo_url);
        take(&mut config.splash_screen_url, &app.splash_screen_url);
    }

    if let Some(store) = &doc.store {
        take(&mut config.store_url, &store.store_url);
        take(&mut config.api_url, &store.api_url);
        take(&mut config.wordpress_url, &store.wordpress_url);
        take(&mut config.consumer_key, &store.consumer_key);
        take(&mut config.consumer_secret, &store.consumer_secret);
        take(&mut config.auth_code, &store.auth_code);
        take(&mut config.jwt_auth_url, &store.jwt_auth_url);
        take(&mut config.auth_token, &store.auth_token);
    }

    if let Some(theme) = &doc.theme {
        take(&mut config.theme.primary_color, &theme.primary_color);
        take(&mut config.theme.secondary_color, &theme.secondary_color);
        take(&mut config.theme.dark_mode, &theme.dark_mode);
    }

    if let Some(regional) = &doc.regional {
        take(&mut config.default_currency, &regional.default_currency);
        take(&mut config.default_language, &regional.default_language);
        take(&mut config.supported_languages, &regional.supported_languages);
        take(&mut config.country_code, &regional.country_code);
        take(&mut config.timezone, &regional.timezone);
        take(&mut config.date_format, &regional.date_format);
        take(&mut config.tax_rate, &regional.tax_rate);
        take(&mut config.shipping_enabled, &regional.shipping_enabled);
    }

    if let Some(payment) = &doc.payment {
        if let Some(gateways) = &payment.gateways {
            let nested = &mut config.payment_gateways;
            take(&mut nested.stripe, &gateways.stripe);
            take(&mut nested.paypal, &gateways.paypal);
            take(&mut nested.moyasar, &gateways.moyasar);
            take(&mut nested.stcpay, &gateways.stcpay);
        }
        if let Some(enabled) = &payment.enabled_payment_gateways {
            config.enabled_payment_gateways = parse_id_list::<PaymentGatewayId>(enabled);
        }
        take(&mut config.allow_demo_checkout, &payment.allow_demo_checkout);
    }

    let nested = &config.payment_gateways;
    config.stripe_publishable_key = nested.stripe.publishable_key.clone();
    config.stripe_secret_key = nested.stripe.secret_key.clone();
    config.paypal_client_id = nested.paypal.client_id.clone();
    config.paypal_client_secret = nested.paypal.client_secret.clone();
    config.moyasar_publishable_key = nested.moyasar.publishable_key.clone();
    config.moyasar_secret_key = nested.moyasar.secret_key.clone();

    if let Some(sms) = &doc.sms {
        if let Some(enabled) = &sms.enabled {
            config.sms_providers = parse_id_list::<SmsProviderId>(enabled);
        }
        if let Some(default_provider) = &sms.default_provider {
            config.default_sms_provider = default_provider.parse().ok();
        }
        if let Some(providers) = &sms.providers {
            take(&mut config.twilio_config, &providers.twilio);
            take(&mut config.firebase_config, &providers.firebase);
            take(&mut config.message_bird_config, &providers.messagebird);
            take(&mut config.vonage_config, &providers.vonage);
            take(&mut config.aws_config, &providers.aws_sns);
            take(&mut config.taqnyat_config, &providers.taqnyat);
        }
    }
    config.taqnyat_api_key = config.taqnyat_config.api_key.clone();
    config.taqnyat_sender = config.taqnyat_config.sender.clone();

    if let Some(notifications) = &doc.notifications {
        take(&mut config.one_signal_app_id, &notifications.one_signal_app_id);
    }

    if let Some(features) = &doc.features {
        let mut toggles = FeatureToggles::default();
        toggles
            .0
            .extend(features.iter().map(|(name, on)| (name.clone(), *on)));
        config.features = toggles;
    }

    if let Some(development) = &doc.development {
        take(&mut config.use_demo_data, &development.use_demo_data);
    }

    config.normalized()
}

/// Express a flat config as a fully populated unified document.
pub fn to_unified(config: &AppConfig) -> UnifiedConfigDocument {
    UnifiedConfigDocument {
        app: Some(AppGroup {
            name: Some(config.name.clone()),
            version: Some(config.version.clone()),
            app_name: Some(config.app_name.clone()),
            app_slogan: Some(config.app_slogan.clone()),
            store_description: Some(config.store_description.clone()),
            logo_url: Some(config.logo_url.clone()),
            splash_screen_url: Some(config.splash_screen_url.clone()),
        }),
        store: Some(StoreGroup {
            store_url: Some(config.store_url.clone()),
            api_url: Some(config.api_url.clone()),
            wordpress_url: Some(config.wordpress_url.clone()),
            consumer_key: Some(config.consumer_key.clone()),
            consumer_secret: Some(config.consumer_secret.clone()),
            auth_code: Some(config.auth_code.clone()),
            jwt_auth_url: Some(config.jwt_auth_url.clone()),
            auth_token: Some(config.auth_token.clone()),
        }),
        theme: Some(ThemeGroup {
            primary_color: Some(config.theme.primary_color.clone()),
            secondary_color: Some(config.theme.secondary_color.clone()),
            dark_mode: Some(config.theme.dark_mode),
        }),
        regional: Some(RegionalGroup {
            default_currency: Some(config.default_currency.clone()),
            default_language: Some(config.default_language.clone()),
            supported_languages: Some(config.supported_languages.clone()),
            country_code: Some(config.country_code.clone()),
            timezone: Some(config.timezone.clone()),
            date_format: Some(config.date_format.clone()),
            tax_rate: Some(config.tax_rate),
            shipping_enabled: Some(config.shipping_enabled),
        }),
        payment: Some(PaymentGroup {
            gateways: Some(GatewaysGroup {
                stripe: Some(config.stripe_credentials()),
                paypal: Some(config.paypal_credentials()),
                moyasar: Some(config.moyasar_credentials()),
                stcpay: Some(config.stcpay_credentials()),
            }),
            enabled_payment_gateways: Some(
                config
                    .enabled_payment_gateways
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            allow_demo_checkout: Some(config.allow_demo_checkout),
        }),
        sms: Some(SmsGroup {
            enabled: Some(config.sms_providers.iter().map(ToString::to_string).collect()),
            default_provider: config.default_sms_provider.map(|id| id.to_string()),
            providers: Some(SmsProvidersGroup {
                twilio: Some(config.twilio_config.clone()),
                firebase: Some(config.firebase_config.clone()),
                messagebird: Some(config.message_bird_config.clone()),
                vonage: Some(config.vonage_config.clone()),
                aws_sns: Some(config.aws_config.clone()),
                taqnyat: Some(config.taqnyat_config.clone()),
            }),
        }),
        notifications: Some(NotificationsGroup {
            one_signal_app_id: Some(config.one_signal_app_id.clone()),
        }),
        features: Some(config.features.0.clone()),
        development: Some(DevelopmentGroup {
            use_demo_data: Some(config.use_demo_data),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_sdk::config::{PaypalEnvironment, StripeCredentials, TaqnyatConfig};

    fn sample_document() -> UnifiedConfigDocument {
        serde_json::from_str(
            r##"{
                "app": { "appName": "Dates & Co" },
                "store": { "storeUrl": "https://dates.example", "consumerKey": "ck_1" },
                "theme": { "primaryColor": "#123456" },
                "regional": { "countryCode": "SA", "defaultCurrency": "SAR", "taxRate": 0.15 },
                "payment": {
                    "gateways": {
                        "stripe": { "publishableKey": "pk_live", "secretKey": "sk_live" },
                        "paypal": { "clientId": "pp", "environment": "live" }
                    },
                    "enabledPaymentGateways": ["stripe", "cod", "stripe", "bitcoin"]
                },
                "sms": {
                    "enabled": ["taqnyat", "aws"],
                    "defaultProvider": "taqnyat",
                    "providers": { "taqnyat": { "apiKey": "tq", "sender": "Dates" } }
                },
                "features": { "enableWishlist": false, "enableChat": true },
                "development": { "useDemoData": true }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_document_yields_default_profile() {
        let config = transform(&UnifiedConfigDocument::default());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_transform_maps_groups_and_fills_legacy_copies() {
        let config = transform(&sample_document());

        assert_eq!(config.app_name, "Dates & Co");
        assert_eq!(config.name, "Your Store Name");
        assert_eq!(config.consumer_key, "ck_1");
        assert_eq!(config.theme.primary_color, "#123456");
        assert_eq!(config.theme.secondary_color, "#003566");
        assert_eq!(config.country_code, "SA");
        assert_eq!(config.timezone, "America/New_York");
        assert_eq!(config.tax_rate, 0.15);

        assert_eq!(
            config.enabled_payment_gateways,
            vec![PaymentGatewayId::Stripe, PaymentGatewayId::Cod]
        );
        assert_eq!(
            config.payment_gateways.stripe,
            StripeCredentials {
                publishable_key: "pk_live".to_string(),
                secret_key: "sk_live".to_string(),
                webhook_secret: String::new(),
            }
        );
        assert_eq!(config.stripe_publishable_key, "pk_live");
        assert_eq!(config.stripe_secret_key, "sk_live");
        assert_eq!(config.paypal_client_id, "pp");
        assert_eq!(config.payment_gateways.paypal.environment, PaypalEnvironment::Live);

        assert_eq!(
            config.sms_providers,
            vec![SmsProviderId::Taqnyat, SmsProviderId::AwsSns]
        );
        assert_eq!(config.default_sms_provider, Some(SmsProviderId::Taqnyat));
        assert_eq!(
            config.taqnyat_config,
            TaqnyatConfig {
                api_key: "tq".to_string(),
                sender: "Dates".to_string()
            }
        );
        assert_eq!(config.taqnyat_api_key, "tq");

        assert!(!config.features.is_enabled("enableWishlist"));
        assert!(config.features.is_enabled("enableOtp"));
        assert!(config.features.is_enabled("enableChat"));
        assert!(config.use_demo_data);
    }

    #[test]
    fn test_transform_is_idempotent() {
        let once = transform(&sample_document());
        assert_eq!(transform(&sample_document()), once);
        assert_eq!(transform(&to_unified(&once)), once);
    }

    #[test]
    fn test_unknown_default_provider_is_cleared() {
        let doc: UnifiedConfigDocument =
            serde_json::from_str(r#"{"sms":{"defaultProvider":"pigeon"}}"#).unwrap();
        assert_eq!(transform(&doc).default_sms_provider, None);
    }

    #[test]
    fn test_endpoint_joins_path_under_base() {
        let fetcher = HttpConfigFetcher::new(Url::parse("https://cdn.example/shop").unwrap());
        assert_eq!(
            fetcher.endpoint(DEFAULT_UNIFIED_CONFIG_PATH).unwrap().as_str(),
            "https://cdn.example/shop/assets/config/unified-config.json"
        );
        assert_eq!(
            fetcher.endpoint("/x.json").unwrap().as_str(),
            "https://cdn.example/shop/x.json"
        );
    }

    #[tokio::test]
    async fn test_no_remote_source_fails_with_network_error() {
        let err = NoRemoteConfig.fetch(DEFAULT_UNIFIED_CONFIG_PATH).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
