// ============================
// crates/backend-lib/src/auth/error.rs
// ============================
//! Failure kinds of the token lifecycle.
use thiserror::Error;

/// Errors produced while issuing or verifying access tokens.
///
/// Verification collapses every forged, corrupted or expired token into
/// `InvalidOrExpiredToken`; the precise reason only reaches the logs.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("token is invalid or expired")]
    InvalidOrExpiredToken,

    #[error("token carries no usable subject")]
    MissingClaim,

    #[error("claim `{0}` is reserved and cannot be supplied by the caller")]
    ReservedClaim(String),

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error("invalid token configuration: {0}")]
    Misconfigured(String),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Whether this error is a rejection of the caller rather than a server fault
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::InvalidOrExpiredToken | AuthError::MissingClaim
        )
    }
}
