//! Contact directory: directed owner -> contact relationships.

mod repository;
mod types;

pub use repository::ContactRepository;
pub use types::{Contact, ContactDetail};
