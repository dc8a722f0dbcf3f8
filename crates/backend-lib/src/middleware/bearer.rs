// crates/backend-lib/src/middleware/bearer.rs

//! Bearer token extraction for protected handlers.
use crate::auth::AuthenticatedIdentity;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::sync::Arc;

/// Extractor that requires a valid bearer token.
///
/// Reads `Authorization: Bearer <token>` and runs it through the state's
/// [`TokenVerifier`](crate::auth::TokenVerifier). A handler taking this
/// argument only runs for authenticated callers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedIdentity);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let identity = state.verifier.verify(token)?;
        Ok(CurrentUser(identity))
    }
}

/// Pull the credential out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::NotAuthenticated)?
        .to_str()
        .map_err(|_| AppError::NotAuthenticated)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AppError::NotAuthenticated)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::NotAuthenticated);
    }

    Ok(token)
}
