//! Resource ownership checks.
//!
//! Every mutating route resolves the target resource to its owner and
//! compares it with the authenticated caller before touching the row.
//! The mapping from resource kind to lookup is a typed registry: each
//! entity repository implements [`OwnerResolver`] exactly once, and
//! [`OwnershipGate`] dispatches on [`ResourceKind`].

use sqlx::SqlitePool;

use crate::folder::FolderRepository;
use crate::message::MessageRepository;
use crate::reception::ReceptionRepository;
use crate::{CourrierError, Result};

/// Kinds of owner-scoped resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A composed message, owned by its sender.
    Message,
    /// A delivery record, owned by its recipient.
    Reception,
    /// A folder, owned by its proprietor.
    Folder,
}

impl ResourceKind {
    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Message => "message",
            ResourceKind::Reception => "reception",
            ResourceKind::Folder => "folder",
        }
    }
}

/// Resolves a resource id to the id of the user who owns it.
///
/// Implemented once per entity repository.
pub trait OwnerResolver {
    /// Return the owner's user id, or `None` if the resource doesn't exist.
    fn owner_of(&self, id: i64) -> impl std::future::Future<Output = Result<Option<i64>>> + Send;
}

/// Ownership gate dispatching a [`ResourceKind`] to the matching resolver.
pub struct OwnershipGate<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OwnershipGate<'a> {
    /// Create a new gate over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Confirm that `user_id` owns the resource, or fail.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no resource with that id exists
    /// - `Permission` if the resource is owned by someone else
    pub async fn ensure_owner(
        &self,
        kind: ResourceKind,
        resource_id: i64,
        user_id: i64,
    ) -> Result<()> {
        let owner = match kind {
            ResourceKind::Message => {
                MessageRepository::new(self.pool).owner_of(resource_id).await?
            }
            ResourceKind::Reception => {
                ReceptionRepository::new(self.pool)
                    .owner_of(resource_id)
                    .await?
            }
            ResourceKind::Folder => FolderRepository::new(self.pool).owner_of(resource_id).await?,
        };

        match owner {
            None => Err(CourrierError::NotFound(kind.as_str().to_string())),
            Some(owner_id) if owner_id == user_id => Ok(()),
            Some(_) => Err(CourrierError::Permission(format!(
                "not the owner of this {}",
                kind.as_str()
            ))),
        }
    }
}
