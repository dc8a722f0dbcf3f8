// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers.
pub mod login;
pub mod protected;

pub use login::login_for_access_token;
pub use protected::{read_protected_data, root};
