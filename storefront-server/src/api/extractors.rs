//! Custom Axum extractors for request authentication.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Carries the plaintext admin secret.
pub const ADMIN_AUTH_HEADER: &str = "Storefront-Admin-Authorization";

/// Proof that the request carried the admin secret.
///
/// The header value is checked against the argon2 hash from the `[admin]`
/// section.
pub struct AdminAuth;

#[derive(Debug, thiserror::Error)]
pub enum AdminAuthError {
    #[error("missing Storefront-Admin-Authorization header")]
    MissingHeader,
    #[error("invalid Storefront-Admin-Authorization header")]
    InvalidHeader,
    #[error("admin secret rejected")]
    Rejected,
}

impl IntoResponse for AdminAuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AdminAuthError::MissingHeader | AdminAuthError::Rejected => StatusCode::UNAUTHORIZED,
            AdminAuthError::InvalidHeader => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AdminAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = parts
            .headers
            .get(ADMIN_AUTH_HEADER)
            .ok_or(AdminAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AdminAuthError::InvalidHeader)?;

        let admin = state.admin.read().await;
        if !admin.verify_secret(secret) {
            drop(admin);
            tracing::warn!("Rejected admin request with wrong secret");
            return Err(AdminAuthError::Rejected);
        }
        Ok(AdminAuth)
    }
}
