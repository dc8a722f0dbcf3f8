// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! This module defines the `Authenticator` trait, the seam between the login
//! endpoint and whatever owns user credentials.
use async_trait::async_trait;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Whether `password` is the correct password for `username`
    async fn authenticate(&self, username: &str, password: &str) -> bool;
}
