//! Contact types for Courrier.

use serde::Serialize;

use crate::user::PublicUser;

/// A directed owner -> contact relationship between two users.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Contact {
    /// Contact entry ID.
    pub id: i64,
    /// Owner user ID.
    pub proprietaire_id: i64,
    /// Referenced user ID.
    pub contact_id: i64,
}

/// A contact entry enriched with the referenced user's public profile.
#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    /// Contact entry ID.
    pub id: i64,
    /// Owner user ID.
    pub proprietaire_id: i64,
    /// Referenced user ID.
    pub contact_id: i64,
    /// The referenced user.
    pub contact: PublicUser,
}
