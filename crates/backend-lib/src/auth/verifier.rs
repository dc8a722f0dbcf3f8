// ============================
// crates/backend-lib/src/auth/verifier.rs
// ============================
//! Bearer token verification.
use super::claims::{AuthenticatedIdentity, Claims, EXPIRATION};
use super::{AuthError, TokenConfig};
use crate::metrics::TOKEN_REJECTED;
use ::metrics::counter;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Validation};
use std::sync::Arc;
use tracing::debug;

/// Turns a presented bearer token into an authenticated identity.
///
/// Handlers depend on this trait rather than on [`JwtVerifier`] so that
/// another implementation can be injected into the application state.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError>;
}

/// Verifies tokens signed by a [`TokenIssuer`](super::TokenIssuer) holding
/// the same [`TokenConfig`].
///
/// Verification runs in a single pass: signature and structure, then
/// expiration, then subject. Every failure is reported to the caller as
/// `InvalidOrExpiredToken` or `MissingClaim`.
#[derive(Debug, Clone)]
pub struct JwtVerifier {
    config: Arc<TokenConfig>,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        // Only the configured algorithm is accepted. Expiration is checked by
        // `verify_at` so that the comparison is exact and clock-injectable.
        let mut validation = Validation::new(config.algorithm());
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&[EXPIRATION]);

        Self { config, validation }
    }

    /// Verify `token` as if the current time were `now`
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let claims = self.decode(token)?;

        if claims.exp <= now.timestamp() {
            reject("expired");
            return Err(AuthError::InvalidOrExpiredToken);
        }

        match claims.sub {
            Some(username) if !username.is_empty() => Ok(AuthenticatedIdentity { username }),
            _ => {
                reject("missing_subject");
                Err(AuthError::MissingClaim)
            },
        }
    }

    /// Check structure and signature and return the embedded claims
    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.config.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature => "invalid_signature",
                    ErrorKind::InvalidAlgorithm => "algorithm_mismatch",
                    ErrorKind::MissingRequiredClaim(_) => "missing_expiration",
                    _ => "malformed",
                };
                reject(reason);
                AuthError::InvalidOrExpiredToken
            })
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.verify_at(token, Utc::now())
    }
}

fn reject(reason: &'static str) {
    counter!(TOKEN_REJECTED, "reason" => reason).increment(1);
    debug!(reason, "rejected access token");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ClaimSet, TokenIssuer};
    use chrono::Duration;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "verifier-test-secret";

    fn config(secret: &str) -> Arc<TokenConfig> {
        Arc::new(TokenConfig::hs256(secret).unwrap())
    }

    fn instant() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn issue(lifetime: Duration) -> String {
        TokenIssuer::new(config(SECRET))
            .issue_at(&ClaimSet::new("johndoe"), Some(lifetime), instant())
            .unwrap()
    }

    fn sign_raw(payload: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_accepts_before_expiration() {
        let verifier = JwtVerifier::new(config(SECRET));
        let token = issue(Duration::minutes(30));

        for offset in [Duration::zero(), Duration::minutes(10), Duration::seconds(30 * 60 - 1)] {
            let identity = verifier.verify_at(&token, instant() + offset).unwrap();
            assert_eq!(identity.username, "johndoe");
        }
    }

    #[test]
    fn test_rejects_at_and_after_expiration() {
        let verifier = JwtVerifier::new(config(SECRET));
        let token = issue(Duration::minutes(30));

        for offset in [Duration::minutes(30), Duration::seconds(30 * 60 + 1), Duration::days(1)] {
            let result = verifier.verify_at(&token, instant() + offset);
            assert!(matches!(result, Err(AuthError::InvalidOrExpiredToken)));
        }
    }

    #[test]
    fn test_fresh_token_verifies_against_wall_clock() {
        let config = config(SECRET);
        let token = TokenIssuer::new(config.clone())
            .issue(&ClaimSet::new("johndoe").with_claim("tenant", "acme"), None)
            .unwrap();

        let identity = JwtVerifier::new(config).verify(&token).unwrap();
        assert_eq!(identity.username, "johndoe");
    }

    #[test]
    fn test_tokens_issued_apart_verify_independently() {
        let issuer = TokenIssuer::new(config(SECRET));
        let verifier = JwtVerifier::new(config(SECRET));
        let claims = ClaimSet::new("johndoe");

        let first = issuer.issue_at(&claims, None, instant()).unwrap();
        let second = issuer
            .issue_at(&claims, None, instant() + Duration::minutes(10))
            .unwrap();
        assert_ne!(first, second);

        let check_at = instant() + Duration::minutes(20);
        assert!(verifier.verify_at(&first, check_at).is_ok());
        assert!(verifier.verify_at(&second, check_at).is_ok());
    }

    #[test]
    fn test_rejects_any_mutated_signature_character() {
        let verifier = JwtVerifier::new(config(SECRET));
        let token = issue(Duration::minutes(30));
        let signature_start = token.rfind('.').unwrap() + 1;

        for index in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(bytes).unwrap();

            let result = verifier.verify_at(&mutated, instant());
            assert!(
                matches!(result, Err(AuthError::InvalidOrExpiredToken)),
                "mutation at {index} was accepted"
            );
        }
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let verifier = JwtVerifier::new(config(SECRET));
        let token = issue(Duration::minutes(30));
        let forged_payload = sign_raw(json!({ "sub": "admin", "exp": 1_900_000_000 }));

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged_payload.split('.').nth(1).unwrap();
        let spliced = parts.join(".");

        assert!(matches!(
            verifier.verify_at(&spliced, instant()),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_rejects_token_from_other_secret() {
        let token = issue(Duration::minutes(30));
        let verifier = JwtVerifier::new(config("some-other-secret"));

        assert!(matches!(
            verifier.verify_at(&token, instant()),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_rejects_other_algorithm_with_same_secret() {
        let hs512 = Arc::new(
            TokenConfig::new(SECRET, Algorithm::HS512, Duration::minutes(30)).unwrap(),
        );
        let token = TokenIssuer::new(hs512)
            .issue_at(&ClaimSet::new("johndoe"), None, instant())
            .unwrap();

        let verifier = JwtVerifier::new(config(SECRET));
        assert!(matches!(
            verifier.verify_at(&token, instant()),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let verifier = JwtVerifier::new(config(SECRET));
        for token in ["", "not-a-token", "a.b.c", "eyJhbGciOiJub25lIn0.eyJzdWIiOiJqb2huZG9lIn0."] {
            assert!(matches!(
                verifier.verify_at(token, instant()),
                Err(AuthError::InvalidOrExpiredToken)
            ));
        }
    }

    #[test]
    fn test_rejects_missing_expiration() {
        let verifier = JwtVerifier::new(config(SECRET));
        let token = sign_raw(json!({ "sub": "johndoe" }));

        assert!(matches!(
            verifier.verify_at(&token, instant()),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_missing_or_empty_subject() {
        let verifier = JwtVerifier::new(config(SECRET));
        let exp = instant().timestamp() + 600;

        for payload in [json!({ "exp": exp }), json!({ "sub": "", "exp": exp })] {
            let token = sign_raw(payload);
            assert!(matches!(
                verifier.verify_at(&token, instant()),
                Err(AuthError::MissingClaim)
            ));
        }
    }

    #[test]
    fn test_usable_as_trait_object() {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(config(SECRET)));
        assert!(verifier.verify("not-a-token").is_err());
    }
}
