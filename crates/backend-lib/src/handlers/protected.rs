// ============================
// crates/backend-lib/src/handlers/protected.rs
// ============================
//! Resources behind the bearer token gate.
use crate::middleware::CurrentUser;
use axum::Json;
use tokengate_common::{ProtectedData, WelcomeMessage};

/// `GET /`: open to everyone
pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Welcome to the Protected API".to_string(),
    })
}

/// `GET /protected`: requires a valid bearer token
#[tracing::instrument(skip_all)]
pub async fn read_protected_data(CurrentUser(user): CurrentUser) -> Json<ProtectedData> {
    tracing::debug!(username = %user.username, "serving protected data");

    Json(ProtectedData {
        data: format!("Secret for user: {}", user.username),
        user_info: user.into(),
    })
}
