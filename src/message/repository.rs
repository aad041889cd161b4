//! Message repository for Courrier.

use sqlx::{QueryBuilder, SqlitePool};

use super::types::{Message, MessageStats, MessageStatus, MessageUpdate, NewMessage};
use crate::auth::OwnerResolver;
use crate::{CourrierError, Result};

const MESSAGE_COLUMNS: &str = "id, expediteur_id, objet, contenu, date_envoi, statut";

/// Repository for message CRUD operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new message.
    ///
    /// Returns the created message with the assigned ID.
    pub async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let result = sqlx::query(
            "INSERT INTO messages (expediteur_id, objet, contenu, statut) VALUES (?, ?, ?, ?)",
        )
        .bind(new_message.expediteur_id)
        .bind(&new_message.objet)
        .bind(&new_message.contenu)
        .bind(new_message.statut.as_str())
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Message>> {
        let result = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List messages by sender with pagination.
    ///
    /// Ordered by send timestamp descending. Returns the page of
    /// messages and the total count.
    pub async fn list_by_sender(
        &self,
        expediteur_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Message>, i64)> {
        let offset = (page.saturating_sub(1)) * limit;

        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE expediteur_id = ?
             ORDER BY date_envoi DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(expediteur_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE expediteur_id = ?")
                .bind(expediteur_id)
                .fetch_one(self.pool)
                .await?;

        Ok((messages, total.0))
    }

    /// List a sender's messages filtered by status.
    pub async fn list_by_status(
        &self,
        expediteur_id: i64,
        statut: MessageStatus,
    ) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE expediteur_id = ? AND statut = ?
             ORDER BY date_envoi DESC, id DESC"
        ))
        .bind(expediteur_id)
        .bind(statut.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Update a message by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated message, or None if not found.
    pub async fn update(&self, id: i64, update: &MessageUpdate) -> Result<Option<Message>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE messages SET ");
        let mut separated = query.separated(", ");

        if let Some(ref objet) = update.objet {
            separated.push("objet = ");
            separated.push_bind_unseparated(objet);
        }
        if let Some(ref contenu) = update.contenu {
            separated.push("contenu = ");
            separated.push_bind_unseparated(contenu);
        }
        if let Some(statut) = update.statut {
            separated.push("statut = ");
            separated.push_bind_unseparated(statut.as_str());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Set a message's status.
    ///
    /// Returns true if a message was updated, false if not found.
    pub async fn update_status(&self, id: i64, statut: MessageStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE messages SET statut = ? WHERE id = ?")
            .bind(statut.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a message (status to CORBEILLE).
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        self.update_status(id, MessageStatus::Trash).await
    }

    /// Permanently delete a message.
    ///
    /// Dependent receptions and attachments are removed in the same
    /// transaction. Returns true if a message row was deleted.
    pub async fn delete_permanent(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM receptions WHERE message_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM attachments WHERE message_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a sender's messages in a given status.
    pub async fn count_by_status(
        &self,
        expediteur_id: i64,
        statut: MessageStatus,
    ) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE expediteur_id = ? AND statut = ?",
        )
        .bind(expediteur_id)
        .bind(statut.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(count.0)
    }

    /// Per-status counts for a sender.
    pub async fn stats(&self, expediteur_id: i64) -> Result<MessageStats> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE expediteur_id = ?")
            .bind(expediteur_id)
            .fetch_one(self.pool)
            .await?;

        Ok(MessageStats {
            total: total.0,
            envoyes: self
                .count_by_status(expediteur_id, MessageStatus::Sent)
                .await?,
            brouillons: self
                .count_by_status(expediteur_id, MessageStatus::Draft)
                .await?,
            corbeille: self
                .count_by_status(expediteur_id, MessageStatus::Trash)
                .await?,
        })
    }
}

impl OwnerResolver for MessageRepository<'_> {
    async fn owner_of(&self, id: i64) -> Result<Option<i64>> {
        let owner: Option<(i64,)> =
            sqlx::query_as("SELECT expediteur_id FROM messages WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(owner.map(|(id,)| id))
    }
}
