//! Admin API handlers.
//!
//! These endpoints are called by the store's config manager screen and
//! require the `Storefront-Admin-Authorization` header with the plaintext
//! admin secret.
//!
//! # Endpoints
//!
//! - `GET   /config`                                  – live config
//! - `PATCH /config`                                  – shallow-merge a partial config
//! - `PUT   /config/sections`                         – replace one named section
//! - `PUT   /config/theme`                            – merge theme fields
//! - `PUT   /config/regional`                         – merge regional fields
//! - `PUT   /config/features/{name}`                  – toggle a feature flag
//! - `PUT   /config/payment-gateways`                 – store gateway credentials
//! - `PUT   /config/payment-gateways/{id}/enabled`    – enable or disable a gateway
//! - `PUT   /config/sms-providers`                    – store provider credentials
//! - `PUT   /config/sms-providers/{id}/enabled`       – enable or disable a provider
//! - `PUT   /config/sms-providers/default`            – choose the default provider
//! - `GET   /config/export`                           – download the config as JSON
//! - `POST  /config/import`                           – replace the config from an export
//! - `POST  /config/reset`                            – drop the override and resolve again
//! - `GET   /config/validate`                         – validation errors and warnings
//! - `GET   /runtime/{theme,regional,payment,sms}`    – derived subsystem state

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use storefront_core::config::ConfigError;
use storefront_sdk::config::AppConfig;
use storefront_sdk::objects::ImportOutcome;

use crate::state::AppState;

mod document;
mod payment;
mod runtime;
mod sections;
mod sms;
mod transfer;

/// Build the Admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/config",
            get(document::get_config).patch(document::patch_config),
        )
        .route("/config/sections", put(document::update_section))
        .route("/config/theme", put(sections::update_theme))
        .route("/config/regional", put(sections::update_regional))
        .route("/config/features/{name}", put(sections::set_feature))
        .route(
            "/config/payment-gateways",
            put(payment::update_payment_gateway),
        )
        .route(
            "/config/payment-gateways/{id}/enabled",
            put(payment::set_payment_gateway_enabled),
        )
        .route("/config/sms-providers", put(sms::update_sms_provider))
        .route(
            "/config/sms-providers/{id}/enabled",
            put(sms::set_sms_provider_enabled),
        )
        .route(
            "/config/sms-providers/default",
            put(sms::set_default_sms_provider),
        )
        .route("/config/export", get(transfer::export_config))
        .route("/config/import", post(transfer::import_config))
        .route("/config/reset", post(transfer::reset_config))
        .route("/config/validate", get(transfer::validate_config))
        .route("/runtime/theme", get(runtime::theme))
        .route("/runtime/regional", get(runtime::regional))
        .route("/runtime/payment", get(runtime::payment))
        .route("/runtime/sms", get(runtime::sms))
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in Admin API handlers.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    Config(ConfigError),
    ImportRejected(ImportOutcome),
    /// The named subsystem has not derived its state yet.
    NotReady(&'static str),
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> Response {
        match self {
            AdminApiError::Config(e) => {
                tracing::error!(error = %e, "Admin API config error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AdminApiError::ImportRejected(outcome) => {
                (StatusCode::BAD_REQUEST, Json(outcome)).into_response()
            }
            AdminApiError::NotReady(subsystem) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{subsystem} state not derived yet"),
            )
                .into_response(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub(crate) fn config_response(config: Arc<AppConfig>) -> Response {
    Json(config.as_ref()).into_response()
}

pub(crate) fn state_response<T: Serialize>(
    subsystem: &'static str,
    state: Option<Arc<T>>,
) -> Result<Response, AdminApiError> {
    let state = state.ok_or(AdminApiError::NotReady(subsystem))?;
    Ok(Json(state.as_ref()).into_response())
}
