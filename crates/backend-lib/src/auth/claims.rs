// ============================
// crates/backend-lib/src/auth/claims.rs
// ============================
//! Claim sets going into the issuer and claims coming out of a token.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokengate_common::UserInfo;

/// Registered claim holding the principal's username
pub const SUBJECT: &str = "sub";
/// Registered claim holding the issue instant (seconds since epoch)
pub const ISSUED_AT: &str = "iat";
/// Registered claim holding the expiration instant (seconds since epoch)
pub const EXPIRATION: &str = "exp";

/// Claim names owned by the issuer
pub const RESERVED_CLAIMS: [&str; 3] = [SUBJECT, ISSUED_AT, EXPIRATION];

/// Claims supplied by the caller of [`TokenIssuer::issue`](super::TokenIssuer::issue).
///
/// The subject is mandatory; anything added through [`ClaimSet::with_claim`]
/// is carried into the token unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSet {
    subject: String,
    extra: Map<String, Value>,
}

impl ClaimSet {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            extra: Map::new(),
        }
    }

    /// Add an application-defined claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Payload of a signed token.
///
/// `exp` and `iat` are encoded as integer seconds since the Unix epoch.
/// `sub` stays optional on the decoding side so a token without a subject
/// surfaces as a missing claim instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity proven by a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub username: String,
}

impl From<AuthenticatedIdentity> for UserInfo {
    fn from(identity: AuthenticatedIdentity) -> Self {
        UserInfo {
            username: identity.username,
        }
    }
}
