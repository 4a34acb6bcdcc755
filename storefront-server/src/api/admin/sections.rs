use axum::{Json, extract::Path, response::Response};
use storefront_sdk::config::{RegionalPatch, ThemePatch};
use storefront_sdk::objects::EnabledRequest;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::config_response;

/// `PUT /config/theme`: merge theme fields.
pub async fn update_theme(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(patch): Json<ThemePatch>,
) -> Response {
    config_response(state.service.update_theme(patch).await)
}

/// `PUT /config/regional`: merge regional fields.
pub async fn update_regional(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Json(patch): Json<RegionalPatch>,
) -> Response {
    config_response(state.service.update_regional(patch).await)
}

/// `PUT /config/features/{name}`
pub async fn set_feature(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    Path(name): Path<String>,
    Json(request): Json<EnabledRequest>,
) -> Response {
    config_response(state.service.set_feature(&name, request.enabled).await)
}
