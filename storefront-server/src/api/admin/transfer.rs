use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};
use storefront_sdk::objects::ValidationResponse;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, config_response};

/// `GET /config/export`: the live config as a pretty-printed JSON download.
pub async fn export_config(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Result<Response, AdminApiError> {
    let exported = state
        .service
        .export_config()
        .await
        .map_err(AdminApiError::Config)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"app-config.json\"",
            ),
        ],
        exported,
    )
        .into_response())
}

/// `POST /config/import`: the body is an exported document, taken as text
/// whatever its content type.
pub async fn import_config(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
    body: String,
) -> Result<Response, AdminApiError> {
    let outcome = state.service.import_config(&body).await;
    if !outcome.success {
        return Err(AdminApiError::ImportRejected(outcome));
    }
    Ok(Json(outcome).into_response())
}

/// `POST /config/reset`: drop the persisted override and resolve again.
pub async fn reset_config(state: axum::extract::State<AppState>, _auth: AdminAuth) -> Response {
    config_response(state.service.reset_config().await)
}

/// `GET /config/validate`
pub async fn validate_config(
    state: axum::extract::State<AppState>,
    _auth: AdminAuth,
) -> Json<ValidationResponse> {
    let report = state.service.validate_config().await;
    Json(ValidationResponse::from(&report))
}
