// ================
// common/src/lib.rs
// ================
//! Wire types shared by the `tokengate` server and its clients.
//! Every HTTP body the server produces or accepts is defined here.

use serde::{Deserialize, Serialize};

/// Token type advertised in every successful login response
pub const BEARER: &str = "bearer";

/// Form fields submitted to `POST /token`
///
/// Mirrors the OAuth2 password grant: `grant_type` may be omitted, and
/// `scope` is accepted but carries no meaning for this server.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Successful login response
/// # Fields
/// * `access_token` - Signed bearer token
/// * `token_type` - Always `bearer`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap a signed token as a bearer token response
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: BEARER.to_string(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Identity of the caller as exposed to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
}

/// Body of `GET /protected`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProtectedData {
    pub data: String,
    pub user_info: UserInfo,
}

/// Body of `GET /`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WelcomeMessage {
    pub message: String,
}
