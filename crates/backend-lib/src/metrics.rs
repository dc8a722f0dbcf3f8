// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const TOKEN_ISSUED: &str = "auth.token.issued";
pub const TOKEN_REJECTED: &str = "auth.token.rejected";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
