// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module: access token issuance and verification, plus the
//! credential check that guards issuance.
pub mod claims;
mod error;
mod issuer;
mod service;
mod service_impl;
mod token_config;
mod verifier;

pub use claims::{AuthenticatedIdentity, ClaimSet, Claims};
pub use error::AuthError;
pub use issuer::TokenIssuer;
pub use service::Authenticator;
pub use service_impl::InMemoryAuthenticator;
pub use token_config::{TokenConfig, DEFAULT_TOKEN_LIFETIME_MINUTES};
pub use verifier::{JwtVerifier, TokenVerifier};
