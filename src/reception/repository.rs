//! Reception repository for Courrier.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::{Reception, ReceptionDetail, ReceptionState, ReceptionStats};
use crate::auth::OwnerResolver;
use crate::folder::FolderSummary;
use crate::message::{Message, MessageWithSender};
use crate::user::UserSummary;
use crate::{CourrierError, Result};

/// Joined select used by every enriched reception query.
const DETAIL_SELECT: &str = "SELECT r.id, r.message_id, r.destinataire_id, r.etat, r.dossier_id,
            m.expediteur_id, m.objet, m.contenu, m.date_envoi, m.statut,
            u.nom AS expediteur_nom, u.prenom AS expediteur_prenom, u.email AS expediteur_email,
            f.nom AS dossier_nom
     FROM receptions r
     JOIN messages m ON m.id = r.message_id
     JOIN users u ON u.id = m.expediteur_id
     LEFT JOIN folders f ON f.id = r.dossier_id";

/// Repository for reception CRUD operations.
pub struct ReceptionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReceptionRepository<'a> {
    /// Create a new ReceptionRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn map_detail(row: &SqliteRow) -> std::result::Result<ReceptionDetail, sqlx::Error> {
        let message = Message {
            id: row.try_get("message_id")?,
            expediteur_id: row.try_get("expediteur_id")?,
            objet: row.try_get("objet")?,
            contenu: row.try_get("contenu")?,
            date_envoi: row.try_get("date_envoi")?,
            statut: row.try_get("statut")?,
        };
        let expediteur = UserSummary {
            id: message.expediteur_id,
            nom: row.try_get("expediteur_nom")?,
            prenom: row.try_get("expediteur_prenom")?,
            email: row.try_get("expediteur_email")?,
        };
        let dossier_id: Option<i64> = row.try_get("dossier_id")?;
        let dossier = match dossier_id {
            Some(id) => Some(FolderSummary {
                id,
                nom: row.try_get("dossier_nom")?,
            }),
            None => None,
        };

        Ok(ReceptionDetail {
            id: row.try_get("id")?,
            message_id: message.id,
            destinataire_id: row.try_get("destinataire_id")?,
            etat: row.try_get("etat")?,
            dossier_id,
            message: MessageWithSender {
                message,
                expediteur,
            },
            dossier,
        })
    }

    /// Create a reception for a (message, recipient) pair.
    ///
    /// The row starts in state RECU.
    pub async fn create(&self, message_id: i64, destinataire_id: i64) -> Result<Reception> {
        let result =
            sqlx::query("INSERT INTO receptions (message_id, destinataire_id) VALUES (?, ?)")
                .bind(message_id)
                .bind(destinataire_id)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("reception".to_string()))
    }

    /// Get a reception by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reception>> {
        let result = sqlx::query_as::<_, Reception>(
            "SELECT id, message_id, destinataire_id, etat, dossier_id
             FROM receptions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a reception by ID, enriched with message, sender and folder.
    pub async fn find_detail_by_id(&self, id: i64) -> Result<Option<ReceptionDetail>> {
        let row = sqlx::query(&format!("{DETAIL_SELECT} WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| Self::map_detail(&r).map_err(CourrierError::from))
            .transpose()
    }

    /// List a recipient's receptions with pagination and an optional
    /// state filter.
    ///
    /// Each row is enriched with its parent message (and that message's
    /// sender) and its folder, ordered by the parent message's send
    /// timestamp descending. Returns the page and the total count.
    pub async fn list_by_recipient(
        &self,
        destinataire_id: i64,
        page: u32,
        limit: u32,
        etat: Option<ReceptionState>,
    ) -> Result<(Vec<ReceptionDetail>, i64)> {
        let offset = (page.saturating_sub(1)) * limit;

        let rows = match etat {
            Some(state) => {
                sqlx::query(&format!(
                    "{DETAIL_SELECT} WHERE r.destinataire_id = ? AND r.etat = ?
                     ORDER BY m.date_envoi DESC, r.id DESC LIMIT ? OFFSET ?"
                ))
                .bind(destinataire_id)
                .bind(state.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "{DETAIL_SELECT} WHERE r.destinataire_id = ?
                     ORDER BY m.date_envoi DESC, r.id DESC LIMIT ? OFFSET ?"
                ))
                .bind(destinataire_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
        };

        let details = rows
            .iter()
            .map(Self::map_detail)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let total: (i64,) = match etat {
            Some(state) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM receptions WHERE destinataire_id = ? AND etat = ?",
                )
                .bind(destinataire_id)
                .bind(state.as_str())
                .fetch_one(self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM receptions WHERE destinataire_id = ?")
                    .bind(destinataire_id)
                    .fetch_one(self.pool)
                    .await?
            }
        };

        Ok((details, total.0))
    }

    /// List the receptions filed into a folder, with pagination.
    pub async fn list_by_folder(
        &self,
        dossier_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<ReceptionDetail>, i64)> {
        let offset = (page.saturating_sub(1)) * limit;

        let rows = sqlx::query(&format!(
            "{DETAIL_SELECT} WHERE r.dossier_id = ?
             ORDER BY m.date_envoi DESC, r.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(dossier_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let details = rows
            .iter()
            .map(Self::map_detail)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM receptions WHERE dossier_id = ?")
            .bind(dossier_id)
            .fetch_one(self.pool)
            .await?;

        Ok((details, total.0))
    }

    /// Mark a reception as read.
    ///
    /// Idempotent: only a RECU row transitions to LU; any other state is
    /// left untouched. Returns true if the reception exists.
    pub async fn mark_as_read(&self, id: i64) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM receptions WHERE id = ?)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        if !exists.0 {
            return Ok(false);
        }

        sqlx::query("UPDATE receptions SET etat = ? WHERE id = ? AND etat = ?")
            .bind(ReceptionState::Read.as_str())
            .bind(id)
            .bind(ReceptionState::Received.as_str())
            .execute(self.pool)
            .await?;

        Ok(true)
    }

    /// Set a reception's state.
    ///
    /// Returns true if a reception was updated, false if not found.
    pub async fn update_state(&self, id: i64, etat: ReceptionState) -> Result<bool> {
        let result = sqlx::query("UPDATE receptions SET etat = ? WHERE id = ?")
            .bind(etat.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// File a reception into a folder, or unfile it with None.
    pub async fn move_to_folder(&self, id: i64, dossier_id: Option<i64>) -> Result<bool> {
        let result = sqlx::query("UPDATE receptions SET dossier_id = ? WHERE id = ?")
            .bind(dossier_id)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a reception (state to CORBEILLE).
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        self.update_state(id, ReceptionState::Trash).await
    }

    /// Permanently delete a reception row.
    pub async fn delete_permanent(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM receptions WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a recipient's unread receptions (state RECU).
    pub async fn count_unread(&self, destinataire_id: i64) -> Result<i64> {
        self.count_by_state(destinataire_id, ReceptionState::Received)
            .await
    }

    /// Count a recipient's receptions in a given state.
    pub async fn count_by_state(
        &self,
        destinataire_id: i64,
        etat: ReceptionState,
    ) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM receptions WHERE destinataire_id = ? AND etat = ?",
        )
        .bind(destinataire_id)
        .bind(etat.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(count.0)
    }

    /// Mark all of a recipient's RECU receptions as LU.
    ///
    /// One statement, all-or-nothing. Returns the number of rows
    /// transitioned.
    pub async fn mark_all_as_read(&self, destinataire_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE receptions SET etat = ? WHERE destinataire_id = ? AND etat = ?",
        )
        .bind(ReceptionState::Read.as_str())
        .bind(destinataire_id)
        .bind(ReceptionState::Received.as_str())
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Per-state counts for a recipient.
    pub async fn stats(&self, destinataire_id: i64) -> Result<ReceptionStats> {
        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM receptions WHERE destinataire_id = ?")
                .bind(destinataire_id)
                .fetch_one(self.pool)
                .await?;

        let recus = self
            .count_by_state(destinataire_id, ReceptionState::Received)
            .await?;

        Ok(ReceptionStats {
            recus,
            lus: self
                .count_by_state(destinataire_id, ReceptionState::Read)
                .await?,
            non_lus: recus,
            archives: self
                .count_by_state(destinataire_id, ReceptionState::Archived)
                .await?,
            corbeille: self
                .count_by_state(destinataire_id, ReceptionState::Trash)
                .await?,
            total: total.0,
        })
    }
}

impl OwnerResolver for ReceptionRepository<'_> {
    async fn owner_of(&self, id: i64) -> Result<Option<i64>> {
        let owner: Option<(i64,)> =
            sqlx::query_as("SELECT destinataire_id FROM receptions WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(owner.map(|(id,)| id))
    }
}
