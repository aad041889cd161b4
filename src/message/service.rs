//! Message service for Courrier.
//!
//! High-level message operations with business logic: recipient
//! validation, reception fan-out, and the draft send transition.

use sqlx::SqlitePool;

use super::repository::MessageRepository;
use super::types::{Message, MessageStatus, NewMessage};
use crate::user::UserRepository;
use crate::{CourrierError, Result};

/// Request to compose a message.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    /// Sender user ID.
    pub expediteur_id: i64,
    /// Subject (optional).
    pub objet: Option<String>,
    /// Body (optional).
    pub contenu: Option<String>,
    /// Recipient user IDs.
    pub destinataires: Vec<i64>,
    /// Initial status.
    pub statut: MessageStatus,
}

/// Service for message operations.
pub struct MessageService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Verify that every recipient id resolves to an existing user.
    ///
    /// The error names the first offending id.
    async fn check_recipients(&self, destinataires: &[i64]) -> Result<()> {
        let users = UserRepository::new(self.pool);
        for &destinataire_id in destinataires {
            if !users.exists(destinataire_id).await? {
                return Err(CourrierError::Validation(format!(
                    "recipient {destinataire_id} does not exist"
                )));
            }
        }
        Ok(())
    }

    /// Insert one reception per recipient for a message.
    ///
    /// Runs inside the caller's transaction so a failure leaves no rows.
    async fn fan_out(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        message_id: i64,
        destinataires: &[i64],
    ) -> Result<()> {
        for &destinataire_id in destinataires {
            sqlx::query("INSERT INTO receptions (message_id, destinataire_id) VALUES (?, ?)")
                .bind(message_id)
                .bind(destinataire_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Compose a message.
    ///
    /// A draft is stored without receptions. Any other requested status
    /// requires at least one recipient; the message is persisted as
    /// ENVOYE with one reception per recipient, atomically.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a recipient id doesn't resolve to
    /// an existing user (naming the id), or if a non-draft has no
    /// recipients.
    pub async fn compose(&self, request: &ComposeRequest) -> Result<(Message, usize)> {
        self.check_recipients(&request.destinataires).await?;

        let repo = MessageRepository::new(self.pool);

        if request.statut == MessageStatus::Draft {
            let mut new_message = NewMessage::new(request.expediteur_id, MessageStatus::Draft);
            new_message.objet = request.objet.clone();
            new_message.contenu = request.contenu.clone();
            let message = repo.create(&new_message).await?;
            return Ok((message, 0));
        }

        if request.destinataires.is_empty() {
            return Err(CourrierError::Validation(
                "at least one recipient is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO messages (expediteur_id, objet, contenu, statut) VALUES (?, ?, ?, ?)",
        )
        .bind(request.expediteur_id)
        .bind(&request.objet)
        .bind(&request.contenu)
        .bind(MessageStatus::Sent.as_str())
        .execute(&mut *tx)
        .await?;

        let message_id = result.last_insert_rowid();
        Self::fan_out(&mut tx, message_id, &request.destinataires).await?;

        tx.commit().await?;

        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("message".to_string()))?;

        Ok((message, request.destinataires.len()))
    }

    /// Send a draft to the given recipients.
    ///
    /// The message must currently be a BROUILLON; it transitions to
    /// ENVOYE with one reception per recipient, atomically.
    pub async fn send_draft(&self, message_id: i64, destinataires: &[i64]) -> Result<usize> {
        let repo = MessageRepository::new(self.pool);
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("message".to_string()))?;

        if message.statut != MessageStatus::Draft {
            return Err(CourrierError::Validation(
                "this message is not a draft".to_string(),
            ));
        }

        if destinataires.is_empty() {
            return Err(CourrierError::Validation(
                "at least one recipient is required".to_string(),
            ));
        }

        self.check_recipients(destinataires).await?;

        let mut tx = self.pool.begin().await?;

        Self::fan_out(&mut tx, message_id, destinataires).await?;

        sqlx::query("UPDATE messages SET statut = ? WHERE id = ?")
            .bind(MessageStatus::Sent.as_str())
            .bind(message_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(destinataires.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reception::{ReceptionRepository, ReceptionState};
    use crate::user::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, i64, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let sender = users
            .create(&NewUser::new("Doe", "John", "john@example.com", "hash"))
            .await
            .unwrap();
        let r1 = users
            .create(&NewUser::new("Smith", "Jane", "jane@example.com", "hash"))
            .await
            .unwrap();
        let r2 = users
            .create(&NewUser::new("Martin", "Paul", "paul@example.com", "hash"))
            .await
            .unwrap();
        (db, sender.id, r1.id, r2.id)
    }

    #[tokio::test]
    async fn test_compose_fans_out() {
        let (db, sender, r1, r2) = setup().await;
        let service = MessageService::new(db.pool());

        let (message, count) = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: Some("Hi".to_string()),
                contenu: Some("Hello".to_string()),
                destinataires: vec![r1, r2],
                statut: MessageStatus::Created,
            })
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(message.statut, MessageStatus::Sent);

        // One reception per recipient, each RECU
        let receptions = ReceptionRepository::new(db.pool());
        for recipient in [r1, r2] {
            let (rows, total) = receptions
                .list_by_recipient(recipient, 1, 10, None)
                .await
                .unwrap();
            assert_eq!(total, 1);
            assert_eq!(rows[0].etat, ReceptionState::Received);
            assert_eq!(rows[0].message.message.id, message.id);
        }
    }

    #[tokio::test]
    async fn test_compose_unknown_recipient_creates_nothing() {
        let (db, sender, r1, _) = setup().await;
        let service = MessageService::new(db.pool());

        let result = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: None,
                contenu: None,
                destinataires: vec![r1, 999],
                statut: MessageStatus::Created,
            })
            .await;

        match result {
            Err(CourrierError::Validation(msg)) => assert!(msg.contains("999")),
            other => panic!("expected validation error, got {other:?}"),
        }

        // No message, no receptions
        let messages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(messages.0, 0);
        let receptions: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM receptions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(receptions.0, 0);
    }

    #[tokio::test]
    async fn test_compose_draft_without_receptions() {
        let (db, sender, _, _) = setup().await;
        let service = MessageService::new(db.pool());

        let (message, count) = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: Some("WIP".to_string()),
                contenu: None,
                destinataires: vec![],
                statut: MessageStatus::Draft,
            })
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(message.statut, MessageStatus::Draft);

        let receptions: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM receptions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(receptions.0, 0);
    }

    #[tokio::test]
    async fn test_compose_non_draft_requires_recipients() {
        let (db, sender, _, _) = setup().await;
        let service = MessageService::new(db.pool());

        let result = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: None,
                contenu: None,
                destinataires: vec![],
                statut: MessageStatus::Created,
            })
            .await;

        assert!(matches!(result, Err(CourrierError::Validation(_))));
    }

    #[tokio::test]
    async fn test_send_draft() {
        let (db, sender, r1, _) = setup().await;
        let service = MessageService::new(db.pool());

        let (draft, _) = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: Some("WIP".to_string()),
                contenu: None,
                destinataires: vec![],
                statut: MessageStatus::Draft,
            })
            .await
            .unwrap();

        let count = service.send_draft(draft.id, &[r1]).await.unwrap();
        assert_eq!(count, 1);

        let message = MessageRepository::new(db.pool())
            .find_by_id(draft.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message.statut, MessageStatus::Sent);
    }

    #[tokio::test]
    async fn test_send_non_draft_rejected() {
        let (db, sender, r1, _) = setup().await;
        let service = MessageService::new(db.pool());

        let (message, _) = service
            .compose(&ComposeRequest {
                expediteur_id: sender,
                objet: None,
                contenu: None,
                destinataires: vec![r1],
                statut: MessageStatus::Created,
            })
            .await
            .unwrap();

        // Already sent, cannot be sent again
        let result = service.send_draft(message.id, &[r1]).await;
        assert!(matches!(result, Err(CourrierError::Validation(_))));
    }

    #[tokio::test]
    async fn test_send_draft_missing_message() {
        let (db, _, r1, _) = setup().await;
        let service = MessageService::new(db.pool());

        let result = service.send_draft(999, &[r1]).await;
        assert!(matches!(result, Err(CourrierError::NotFound(_))));
    }
}
