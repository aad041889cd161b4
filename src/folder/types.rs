//! Folder types for Courrier.

use serde::Serialize;

/// A user-owned folder into which receptions can be filed.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Folder {
    /// Folder ID.
    pub id: i64,
    /// Folder name (unique per owner).
    pub nom: String,
    /// Owner user ID.
    pub proprietaire_id: i64,
}

/// Compact folder summary embedded in reception payloads.
#[derive(Debug, Clone, Serialize)]
pub struct FolderSummary {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub nom: String,
}

/// A folder enriched with the number of receptions filed into it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FolderWithCount {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub nom: String,
    /// Owner user ID.
    pub proprietaire_id: i64,
    /// Number of receptions whose folder id equals this folder.
    pub nombre_messages: i64,
}

/// Data for creating a new folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name.
    pub nom: String,
    /// Owner user ID.
    pub proprietaire_id: i64,
}

impl NewFolder {
    /// Create a new folder for the given owner.
    pub fn new(nom: impl Into<String>, proprietaire_id: i64) -> Self {
        Self {
            nom: nom.into(),
            proprietaire_id,
        }
    }
}
