use axum::{Json, extract::Path, response::Response};
use storefront_sdk::config::{GatewayCredentials, PaymentGatewayId};
use storefront_sdk::objects::EnabledRequest;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::config_response;

/// `PUT /config/payment-gateways`: store credentials for the gateway named
/// in the body.
pub async fn update_payment_gateway(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(credentials): Json<GatewayCredentials>,
) -> Response {
    config_response(state.service.update_payment_gateway(credentials).await)
}

/// `PUT /config/payment-gateways/{id}/enabled`
pub async fn set_payment_gateway_enabled(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(gateway): Path<PaymentGatewayId>,
    Json(request): Json<EnabledRequest>,
) -> Response {
    config_response(
        state
            .service
            .set_payment_gateway_enabled(gateway, request.enabled)
            .await,
    )
}
