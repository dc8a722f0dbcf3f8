// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use crate::auth::AuthError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tokengate_common::ErrorDetail;

/// Detail returned for a failed login
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";
/// Detail returned for any token that fails verification
pub const COULD_NOT_VALIDATE: &str = "Could not validate credentials";
/// Detail returned when no bearer credential was presented
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Missing or malformed Authorization header")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(e) if e.is_rejection() => StatusCode::UNAUTHORIZED,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(AuthError::InvalidCredentials) => "AUTH_001",
            AppError::Auth(AuthError::InvalidOrExpiredToken) => "AUTH_002",
            AppError::Auth(AuthError::MissingClaim) => "AUTH_003",
            AppError::NotAuthenticated => "AUTH_004",
            AppError::Auth(_) => "TOKEN_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message placed in the `detail` field of the response body.
    ///
    /// Expired, forged and subject-less tokens share one message.
    pub fn detail(&self) -> String {
        match self {
            AppError::Auth(AuthError::InvalidCredentials) => INCORRECT_CREDENTIALS.to_string(),
            AppError::Auth(AuthError::InvalidOrExpiredToken | AuthError::MissingClaim) => {
                COULD_NOT_VALIDATE.to_string()
            },
            AppError::NotAuthenticated => NOT_AUTHENTICATED.to_string(),
            AppError::InvalidInput(reason) => reason.clone(),
            AppError::Auth(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error_code, error = %self, "request failed");
        } else {
            tracing::debug!(error_code, error = %self, "request rejected");
        }

        let mut response = (status, Json(ErrorDetail::new(self.detail()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
