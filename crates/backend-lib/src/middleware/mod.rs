// crates/backend-lib/src/middleware/mod.rs

//! Request guards for the `tokengate` server.

pub mod bearer;

pub use bearer::{bearer_token, CurrentUser};
