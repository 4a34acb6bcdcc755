//! Focused setters for one section of the live config.
//!
//! Each builds the next document from the live one through
//! [`ConfigService::modify`] and keeps every sibling key of the section it
//! touches.

use super::service::ConfigService;
use std::sync::Arc;
use storefront_sdk::config::{
    AppConfig, GatewayCredentials, PaymentGatewayId, RegionalPatch, SmsCredentials,
    SmsProviderId, ThemePatch,
};
use tracing::{debug, info};

fn toggle<T: PartialEq + Copy>(ids: &mut Vec<T>, id: T, enabled: bool) {
    if enabled {
        if !ids.contains(&id) {
            ids.push(id);
        }
    } else {
        ids.retain(|existing| *existing != id);
    }
}

impl ConfigService {
    pub async fn update_theme(&self, patch: ThemePatch) -> Arc<AppConfig> {
        let next = self
            .modify(move |current| {
                let mut next = current.clone();
                next.theme = current.theme.merged(patch);
                next
            })
            .await;
        self.notify_theme(&next.theme);
        next
    }

    pub async fn update_primary_color(&self, color: impl Into<String>) -> Arc<AppConfig> {
        self.update_theme(ThemePatch {
            primary_color: Some(color.into()),
            ..Default::default()
        })
        .await
    }

    pub async fn update_dark_mode(&self, dark_mode: bool) -> Arc<AppConfig> {
        self.update_theme(ThemePatch {
            dark_mode: Some(dark_mode),
            ..Default::default()
        })
        .await
    }

    pub async fn update_regional(&self, patch: RegionalPatch) -> Arc<AppConfig> {
        self.modify(move |current| {
            let mut next = current.clone();
            next.set_regional(current.regional().merged(patch));
            next
        })
        .await
    }

    pub async fn set_feature(&self, name: &str, enabled: bool) -> Arc<AppConfig> {
        debug!(feature = name, enabled, "Setting feature toggle");
        self.modify(|current| {
            let mut next = current.clone();
            next.features = current.features.with(name, enabled);
            next
        })
        .await
    }

    /// Replace the credentials of one gateway, refreshing its legacy flat
    /// copies. Other gateways are untouched.
    pub async fn update_payment_gateway(&self, credentials: GatewayCredentials) -> Arc<AppConfig> {
        let gateway = credentials.gateway();
        let next = self
            .modify(move |current| {
                let mut next = current.clone();
                next.set_gateway_credentials(credentials);
                next
            })
            .await;
        info!(%gateway, "Payment gateway credentials updated");
        next
    }

    pub async fn set_payment_gateway_enabled(
        &self,
        gateway: PaymentGatewayId,
        enabled: bool,
    ) -> Arc<AppConfig> {
        info!(%gateway, enabled, "Toggling payment gateway");
        self.modify(move |current| {
            let mut next = current.clone();
            toggle(&mut next.enabled_payment_gateways, gateway, enabled);
            next
        })
        .await
    }

    pub async fn update_sms_provider(&self, credentials: SmsCredentials) -> Arc<AppConfig> {
        let provider = credentials.provider();
        let next = self
            .modify(move |current| {
                let mut next = current.clone();
                next.set_sms_credentials(credentials);
                next
            })
            .await;
        info!(%provider, "SMS provider credentials updated");
        next
    }

    pub async fn set_sms_provider_enabled(
        &self,
        provider: SmsProviderId,
        enabled: bool,
    ) -> Arc<AppConfig> {
        info!(%provider, enabled, "Toggling SMS provider");
        self.modify(move |current| {
            let mut next = current.clone();
            toggle(&mut next.sms_providers, provider, enabled);
            next
        })
        .await
    }

    pub async fn set_default_sms_provider(
        &self,
        provider: Option<SmsProviderId>,
    ) -> Arc<AppConfig> {
        self.modify(move |current| {
            let mut next = current.clone();
            next.default_sms_provider = provider;
            next
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::service::ConfigService;
    use crate::config::storage::MemoryStorage;
    use std::sync::Arc;
    use storefront_sdk::config::{
        GatewayCredentials, PaymentGatewayId, RegionalPatch, SmsCredentials, SmsProviderId,
        StripeCredentials, TaqnyatConfig, default_config,
    };

    async fn ready_service() -> ConfigService {
        let service = ConfigService::builder(Arc::new(MemoryStorage::new())).build();
        service.initialize().await;
        service
    }

    #[tokio::test]
    async fn test_primary_color_keeps_theme_siblings() {
        let service = ready_service().await;
        service.update_dark_mode(true).await;
        let next = service.update_primary_color("#ff0000").await;

        assert_eq!(next.theme.primary_color, "#ff0000");
        assert_eq!(next.theme.secondary_color, "#003566");
        assert!(next.theme.dark_mode);
    }

    #[tokio::test]
    async fn test_regional_patch_keeps_other_fields() {
        let service = ready_service().await;
        let next = service
            .update_regional(RegionalPatch {
                country_code: Some("AE".to_string()),
                default_currency: Some("AED".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(next.country_code, "AE");
        assert_eq!(next.default_currency, "AED");
        assert_eq!(next.timezone, "America/New_York");
        assert_eq!(next.supported_languages, default_config().supported_languages);
    }

    #[tokio::test]
    async fn test_set_feature_only_touches_named_toggle() {
        let service = ready_service().await;
        let next = service.set_feature("enableReviews", false).await;
        assert!(!next.features.is_enabled("enableReviews"));
        assert!(next.features.is_enabled("enableWishlist"));
        assert!(next.features.is_enabled("enableOtp"));
    }

    #[tokio::test]
    async fn test_gateway_credentials_refresh_legacy_and_keep_others() {
        let service = ready_service().await;
        service
            .update_payment_gateway(GatewayCredentials::Stripe(StripeCredentials {
                publishable_key: "pk_1".to_string(),
                secret_key: "sk_1".to_string(),
                webhook_secret: "wh_1".to_string(),
            }))
            .await;
        let before_paypal = service.get_config().unwrap().payment_gateways.paypal.clone();

        let next = service
            .update_payment_gateway(GatewayCredentials::Stripe(StripeCredentials {
                publishable_key: "pk_2".to_string(),
                ..Default::default()
            }))
            .await;
        assert_eq!(next.payment_gateways.stripe.publishable_key, "pk_2");
        assert_eq!(next.stripe_publishable_key, "pk_2");
        assert_eq!(next.stripe_secret_key, "");
        assert_eq!(next.payment_gateways.paypal, before_paypal);
    }

    #[tokio::test]
    async fn test_gateway_toggle_is_ordered_and_unique() {
        let service = ready_service().await;
        service
            .set_payment_gateway_enabled(PaymentGatewayId::Stripe, true)
            .await;
        let next = service
            .set_payment_gateway_enabled(PaymentGatewayId::Stripe, true)
            .await;
        assert_eq!(
            next.enabled_payment_gateways,
            vec![
                PaymentGatewayId::Cod,
                PaymentGatewayId::Moyasar,
                PaymentGatewayId::Stripe
            ]
        );

        let next = service
            .set_payment_gateway_enabled(PaymentGatewayId::Cod, false)
            .await;
        assert_eq!(
            next.enabled_payment_gateways,
            vec![PaymentGatewayId::Moyasar, PaymentGatewayId::Stripe]
        );
    }

    #[tokio::test]
    async fn test_sms_updates() {
        let service = ready_service().await;
        service
            .update_sms_provider(SmsCredentials::Taqnyat(TaqnyatConfig {
                api_key: "tq".to_string(),
                sender: "Shop".to_string(),
            }))
            .await;
        service
            .set_sms_provider_enabled(SmsProviderId::Taqnyat, true)
            .await;
        let next = service
            .set_default_sms_provider(Some(SmsProviderId::Taqnyat))
            .await;

        assert_eq!(next.taqnyat_api_key, "tq");
        assert_eq!(
            next.sms_providers,
            vec![SmsProviderId::Twilio, SmsProviderId::Taqnyat]
        );
        assert_eq!(next.default_sms_provider, Some(SmsProviderId::Taqnyat));
        assert!(
            service
                .sms_credentials(SmsProviderId::Taqnyat)
                .is_configured()
        );

        let next = service.set_default_sms_provider(None).await;
        assert_eq!(next.default_sms_provider, None);
    }
}
