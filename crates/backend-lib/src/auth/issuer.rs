// ============================
// crates/backend-lib/src/auth/issuer.rs
// ============================
//! Access token issuance.
use super::claims::{ClaimSet, Claims, RESERVED_CLAIMS};
use super::{AuthError, TokenConfig};
use crate::metrics::TOKEN_ISSUED;
use ::metrics::counter;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Header};
use std::sync::Arc;
use tracing::debug;

/// Signs access tokens with the process-wide [`TokenConfig`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: Arc<TokenConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        Self { config }
    }

    /// Issue a token valid from now for `lifetime`, or the configured default
    pub fn issue(&self, claims: &ClaimSet, lifetime: Option<Duration>) -> Result<String, AuthError> {
        self.issue_at(claims, lifetime, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// The output depends only on the arguments and the configuration.
    pub fn issue_at(
        &self,
        claims: &ClaimSet,
        lifetime: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let subject = claims.subject();
        if subject.is_empty() {
            return Err(AuthError::MissingClaim);
        }
        if let Some(name) = claims
            .extra()
            .keys()
            .find(|name| RESERVED_CLAIMS.contains(&name.as_str()))
        {
            return Err(AuthError::ReservedClaim(name.clone()));
        }

        let lifetime = lifetime.unwrap_or_else(|| self.config.default_lifetime());
        if lifetime <= Duration::zero() {
            return Err(AuthError::InvalidLifetime);
        }
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(AuthError::InvalidLifetime)?;

        let payload = Claims {
            sub: Some(subject.to_string()),
            iat: Some(now.timestamp()),
            exp: expires_at.timestamp(),
            extra: claims.extra().clone(),
        };

        let token = encode(
            &Header::new(self.config.algorithm()),
            &payload,
            self.config.encoding_key(),
        )
        .map_err(AuthError::Signing)?;

        counter!(TOKEN_ISSUED).increment(1);
        debug!(subject, exp = payload.exp, "issued access token");

        Ok(token)
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }
}
