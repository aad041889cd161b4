//! Attachment repository for Courrier.

use sqlx::SqlitePool;

use super::types::Attachment;
use crate::Result;

/// Repository for message attachments.
pub struct AttachmentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AttachmentRepository<'a> {
    /// Create a new AttachmentRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an attachment for a message.
    pub async fn create(
        &self,
        message_id: i64,
        nom_fichier: &str,
        chemin_fichier: &str,
    ) -> Result<Attachment> {
        let result = sqlx::query(
            "INSERT INTO attachments (message_id, nom_fichier, chemin_fichier) VALUES (?, ?, ?)",
        )
        .bind(message_id)
        .bind(nom_fichier)
        .bind(chemin_fichier)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let attachment = sqlx::query_as::<_, Attachment>(
            "SELECT id, message_id, nom_fichier, chemin_fichier FROM attachments WHERE id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(attachment)
    }

    /// List the attachments of a message.
    pub async fn list_by_message(&self, message_id: i64) -> Result<Vec<Attachment>> {
        let attachments = sqlx::query_as::<_, Attachment>(
            "SELECT id, message_id, nom_fichier, chemin_fichier
             FROM attachments WHERE message_id = ? ORDER BY id",
        )
        .bind(message_id)
        .fetch_all(self.pool)
        .await?;

        Ok(attachments)
    }

    /// Remove all attachments of a message. Returns the number removed.
    pub async fn delete_by_message(&self, message_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM attachments WHERE message_id = ?")
            .bind(message_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
