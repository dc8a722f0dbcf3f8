// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP routes of the token gate.
use crate::handlers::{login_for_access_token, read_protected_data, root};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/token", post(login_for_access_token))
        .route("/protected", get(read_protected_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
