use axum::{Json, response::Response};
use storefront_sdk::config::{AppConfigPatch, SectionUpdate};

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::config_response;

/// `GET /config`: the live config, resolving it first if needed.
pub async fn get_config(state: axum::extract::State<AppState>, _auth: AdminAuth) -> Response {
    config_response(state.service.wait_for_config().await)
}

/// `PATCH /config`: shallow-merge the present top-level fields.
pub async fn patch_config(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(patch): Json<AppConfigPatch>,
) -> Response {
    config_response(state.service.update_config(patch).await)
}

/// `PUT /config/sections`: replace one named section.
pub async fn update_section(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(update): Json<SectionUpdate>,
) -> Response {
    tracing::debug!(section = update.name(), "Admin section update");
    config_response(state.service.update_section(update).await)
}
