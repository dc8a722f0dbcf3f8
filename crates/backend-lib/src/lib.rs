// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library of the `tokengate` server: signed, time-limited access
//! tokens issued on valid credentials and required on protected endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;

use crate::auth::{Authenticator, InMemoryAuthenticator, JwtVerifier, TokenIssuer, TokenVerifier};
use crate::config::{Settings, SettingsError};
use std::sync::Arc;

pub use crate::error::AppError;
pub use crate::router::create_router;

/// Application state shared across all handlers.
///
/// Everything here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    /// Signs tokens for successful logins
    pub issuer: TokenIssuer,
    /// Gate in front of protected handlers
    pub verifier: Arc<dyn TokenVerifier>,
    /// Credential check behind the login endpoint
    pub authenticator: Arc<dyn Authenticator>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        let token_config = Arc::new(settings.auth.token_config()?);
        let authenticator = InMemoryAuthenticator::from_credentials(&settings.auth.users);

        Ok(Self {
            issuer: TokenIssuer::new(token_config.clone()),
            verifier: Arc::new(JwtVerifier::new(token_config)),
            authenticator: Arc::new(authenticator),
            settings: Arc::new(settings),
        })
    }

    /// Replace the token verifier
    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Replace the credential check
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}
