//! API handlers for the Web API.

pub mod auth;
pub mod contact;
pub mod folder;
pub mod info;
pub mod message;
pub mod reception;

pub use auth::AppState;
