//! Middleware for the Web API.

mod auth;
mod cors;

pub use auth::{inject_state, CurrentUser};
pub use cors::create_cors_layer;
