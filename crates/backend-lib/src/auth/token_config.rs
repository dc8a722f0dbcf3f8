// ============================
// crates/backend-lib/src/auth/token_config.rs
// ============================
//! Signing material shared by the issuer and the verifier.
use super::AuthError;
use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use std::fmt;

/// Default lifetime of an access token in minutes
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Immutable token configuration, built once at startup.
#[derive(Clone)]
pub struct TokenConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_lifetime: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("algorithm", &self.algorithm)
            .field("default_lifetime", &self.default_lifetime)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl TokenConfig {
    /// Build a configuration for a symmetric (HMAC) algorithm
    pub fn new(
        secret: impl AsRef<[u8]>,
        algorithm: Algorithm,
        default_lifetime: Duration,
    ) -> Result<Self, AuthError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthError::Misconfigured("secret key is empty".to_string()));
        }
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AuthError::Misconfigured(format!(
                "{algorithm:?} is not a shared-secret algorithm"
            )));
        }
        if default_lifetime <= Duration::zero() {
            return Err(AuthError::Misconfigured(
                "default token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_lifetime,
        })
    }

    /// HS256 with the default 30 minute lifetime
    pub fn hs256(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        Self::new(
            secret,
            Algorithm::HS256,
            Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES),
        )
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
