// ============================
// crates/backend-lib/src/handlers/login.rs
// ============================
//! `POST /token`: trade a username and password for an access token.
use crate::auth::{AuthError, ClaimSet};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED};
use crate::AppState;
use ::metrics::counter;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use std::sync::Arc;
use tokengate_common::{LoginForm, TokenResponse};
use tracing::{info, warn};

/// Only the OAuth2 password grant is served
const PASSWORD_GRANT: &str = "password";

/// Handle a form-encoded credential submission.
///
/// The password never leaves this function; only the username is logged.
#[tracing::instrument(skip_all)]
pub async fn login_for_access_token(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != PASSWORD_GRANT {
            return Err(AppError::InvalidInput("Unsupported grant_type".to_string()));
        }
    }

    if !state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
    {
        counter!(LOGIN_FAILED).increment(1);
        warn!(username = %form.username, "rejected login attempt");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.issuer.issue(&ClaimSet::new(form.username.as_str()), None)?;

    counter!(LOGIN_SUCCEEDED).increment(1);
    info!(username = %form.username, "issued access token");

    Ok(Json(TokenResponse::bearer(token)))
}
