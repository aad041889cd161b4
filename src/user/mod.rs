//! User entity and repository.

mod repository;
mod types;

pub use repository::UserRepository;
pub use types::{NewUser, PublicUser, User, UserSummary, UserUpdate};
