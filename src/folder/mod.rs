//! Folder registry: user-owned named folders for filing receptions.

mod repository;
mod types;

pub use repository::FolderRepository;
pub use types::{Folder, FolderSummary, FolderWithCount, NewFolder};
