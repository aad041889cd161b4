//! Courrier - REST backend for a webmail-style messaging application.
//!
//! Users register, authenticate, exchange messages, organize them into
//! folders, and maintain a contact list.

pub mod auth;
pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod folder;
pub mod logging;
pub mod message;
pub mod reception;
pub mod user;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, Claims, OwnerResolver, OwnershipGate,
    PasswordError, ResourceKind, TokenKeys,
};
pub use config::Config;
pub use db::Database;
pub use error::{CourrierError, Result};
pub use web::WebServer;
