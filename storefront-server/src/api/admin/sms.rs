use axum::{Json, extract::Path, response::Response};
use storefront_sdk::config::{SmsCredentials, SmsProviderId};
use storefront_sdk::objects::{DefaultProviderRequest, EnabledRequest};

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::config_response;

/// `PUT /config/sms-providers`: store credentials for the provider named in
/// the body.
pub async fn update_sms_provider(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(credentials): Json<SmsCredentials>,
) -> Response {
    config_response(state.service.update_sms_provider(credentials).await)
}

/// `PUT /config/sms-providers/{id}/enabled`
pub async fn set_sms_provider_enabled(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(provider): Path<SmsProviderId>,
    Json(request): Json<EnabledRequest>,
) -> Response {
    config_response(
        state
            .service
            .set_sms_provider_enabled(provider, request.enabled)
            .await,
    )
}

/// `PUT /config/sms-providers/default`: `{"provider": null}` clears the
/// default.
pub async fn set_default_sms_provider(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(request): Json<DefaultProviderRequest>,
) -> Response {
    config_response(
        state
            .service
            .set_default_sms_provider(request.provider)
            .await,
    )
}
