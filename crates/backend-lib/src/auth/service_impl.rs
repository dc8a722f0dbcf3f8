// ============================
// crates/backend-lib/src/auth/service_impl.rs
// ============================
//! In-memory credential table behind the `Authenticator` seam.
use crate::auth::Authenticator;
use crate::config::UserCredentials;
use async_trait::async_trait;
use std::collections::HashMap;

/// Username → password table held in memory.
///
/// Passwords are compared as given; there is no hashing at this layer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthenticator {
    users: HashMap<String, String>,
}

impl InMemoryAuthenticator {
    pub fn new<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(username, password)| (username.into(), password.into()))
                .collect(),
        }
    }

    pub fn from_credentials(credentials: &[UserCredentials]) -> Self {
        Self::new(
            credentials
                .iter()
                .map(|c| (c.username.clone(), c.password.clone())),
        )
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}
