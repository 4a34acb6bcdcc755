//! Read-only views of the derived subsystem state.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storefront_core::subsystems::{PaymentState, SmsState};
use storefront_sdk::config::{PaymentGatewayId, SmsProviderId};

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, state_response};

/// Payment state plus the gateway recommended for the store's own currency
/// and country.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRuntime<'a> {
    #[serde(flatten)]
    state: &'a PaymentState,
    recommended_gateway: Option<PaymentGatewayId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SmsRuntime<'a> {
    #[serde(flatten)]
    state: &'a SmsState,
    recommended_provider: Option<SmsProviderId>,
}

/// `GET /runtime/theme`
pub async fn theme(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Result<Response, AdminApiError> {
    state_response("theme", state.subsystems.theme.state())
}

/// `GET /runtime/regional`
pub async fn regional(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Result<Response, AdminApiError> {
    state_response("regional", state.subsystems.regional.state())
}

/// `GET /runtime/payment`
pub async fn payment(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Result<Response, AdminApiError> {
    let payment = state
        .subsystems
        .payment
        .state()
        .ok_or(AdminApiError::NotReady("payment"))?;
    let recommended_gateway =
        payment.recommended_gateway(&payment.currency, &payment.country_code);
    Ok(Json(PaymentRuntime {
        state: &payment,
        recommended_gateway,
    })
    .into_response())
}

/// `GET /runtime/sms`
pub async fn sms(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Result<Response, AdminApiError> {
    let sms = state
        .subsystems
        .sms
        .state()
        .ok_or(AdminApiError::NotReady("sms"))?;
    let recommended_provider = sms.recommended_provider(&sms.country_code);
    Ok(Json(SmsRuntime {
        state: &sms,
        recommended_provider,
    })
    .into_response())
}
