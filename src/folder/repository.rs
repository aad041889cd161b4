//! Folder repository for Courrier.

use sqlx::SqlitePool;

use super::types::{Folder, FolderWithCount, NewFolder};
use crate::auth::OwnerResolver;
use crate::{CourrierError, Result};

/// Repository for folder CRUD operations.
pub struct FolderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FolderRepository<'a> {
    /// Create a new FolderRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new folder.
    ///
    /// The (name, owner) pair is unique; a duplicate fails with a
    /// validation error.
    pub async fn create(&self, new_folder: &NewFolder) -> Result<Folder> {
        let result = sqlx::query("INSERT INTO folders (nom, proprietaire_id) VALUES (?, ?)")
            .bind(&new_folder.nom)
            .bind(new_folder.proprietaire_id)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("folder".to_string()))
    }

    /// Get a folder by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Folder>> {
        let result = sqlx::query_as::<_, Folder>(
            "SELECT id, nom, proprietaire_id FROM folders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a folder by ID with its filed-reception count.
    pub async fn find_by_id_with_count(&self, id: i64) -> Result<Option<FolderWithCount>> {
        let result = sqlx::query_as::<_, FolderWithCount>(
            "SELECT f.id, f.nom, f.proprietaire_id,
                    (SELECT COUNT(*) FROM receptions r WHERE r.dossier_id = f.id) AS nombre_messages
             FROM folders f WHERE f.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a folder by name and owner.
    pub async fn find_by_name_and_owner(
        &self,
        nom: &str,
        proprietaire_id: i64,
    ) -> Result<Option<Folder>> {
        let result = sqlx::query_as::<_, Folder>(
            "SELECT id, nom, proprietaire_id FROM folders WHERE nom = ? AND proprietaire_id = ?",
        )
        .bind(nom)
        .bind(proprietaire_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List an owner's folders with their filed-reception counts,
    /// ordered by name.
    pub async fn list_by_owner(&self, proprietaire_id: i64) -> Result<Vec<FolderWithCount>> {
        let folders = sqlx::query_as::<_, FolderWithCount>(
            "SELECT f.id, f.nom, f.proprietaire_id,
                    (SELECT COUNT(*) FROM receptions r WHERE r.dossier_id = f.id) AS nombre_messages
             FROM folders f WHERE f.proprietaire_id = ? ORDER BY f.nom",
        )
        .bind(proprietaire_id)
        .fetch_all(self.pool)
        .await?;

        Ok(folders)
    }

    /// Rename a folder.
    ///
    /// Returns the updated folder, or None if not found.
    pub async fn update_name(&self, id: i64, nom: &str) -> Result<Option<Folder>> {
        let result = sqlx::query("UPDATE folders SET nom = ? WHERE id = ?")
            .bind(nom)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Delete a folder.
    ///
    /// All receptions filed into it are unfiled (folder id cleared to
    /// null) and the folder row removed, in one transaction. Returns
    /// true if a folder row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE receptions SET dossier_id = NULL WHERE dossier_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a folder belongs to a user.
    pub async fn belongs_to_user(&self, id: i64, user_id: i64) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM folders WHERE id = ? AND proprietaire_id = ?)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Count an owner's folders.
    pub async fn count_by_owner(&self, proprietaire_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM folders WHERE proprietaire_id = ?")
                .bind(proprietaire_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count.0)
    }

    /// File a batch of receptions into a folder.
    ///
    /// Each reception is moved only if it belongs to the caller;
    /// non-owned ids are silently skipped. Runs in one transaction and
    /// returns the number of receptions actually moved.
    pub async fn move_many(
        &self,
        dossier_id: i64,
        reception_ids: &[i64],
        destinataire_id: i64,
    ) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut moved = 0;

        for &reception_id in reception_ids {
            let result = sqlx::query(
                "UPDATE receptions SET dossier_id = ? WHERE id = ? AND destinataire_id = ?",
            )
            .bind(dossier_id)
            .bind(reception_id)
            .bind(destinataire_id)
            .execute(&mut *tx)
            .await?;
            moved += result.rows_affected();
        }

        tx.commit().await?;
        Ok(moved)
    }
}

impl OwnerResolver for FolderRepository<'_> {
    async fn owner_of(&self, id: i64) -> Result<Option<i64>> {
        let owner: Option<(i64,)> =
            sqlx::query_as("SELECT proprietaire_id FROM folders WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(owner.map(|(id,)| id))
    }
}
