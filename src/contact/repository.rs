//! Contact repository for Courrier.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::{Contact, ContactDetail};
use crate::user::PublicUser;
use crate::{CourrierError, Result};

/// Joined select for contact entries with the referenced user.
const DETAIL_SELECT: &str = "SELECT c.id, c.proprietaire_id, c.contact_id,
            u.nom, u.prenom, u.email, u.telephone_mobile, u.photo_profil
     FROM contacts c
     JOIN users u ON u.id = c.contact_id";

/// Repository for contact CRUD operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new ContactRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn map_detail(row: &SqliteRow) -> std::result::Result<ContactDetail, sqlx::Error> {
        let contact_id: i64 = row.try_get("contact_id")?;
        Ok(ContactDetail {
            id: row.try_get("id")?,
            proprietaire_id: row.try_get("proprietaire_id")?,
            contact_id,
            contact: PublicUser {
                id: contact_id,
                nom: row.try_get("nom")?,
                prenom: row.try_get("prenom")?,
                email: row.try_get("email")?,
                telephone_mobile: row.try_get("telephone_mobile")?,
                photo_profil: row.try_get("photo_profil")?,
            },
        })
    }

    /// Create a contact entry.
    ///
    /// The (owner, contact) pair is unique; a duplicate fails with a
    /// validation error.
    pub async fn create(&self, proprietaire_id: i64, contact_id: i64) -> Result<Contact> {
        let result =
            sqlx::query("INSERT INTO contacts (proprietaire_id, contact_id) VALUES (?, ?)")
                .bind(proprietaire_id)
                .bind(contact_id)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("contact".to_string()))
    }

    /// Get a contact entry by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
        let result = sqlx::query_as::<_, Contact>(
            "SELECT id, proprietaire_id, contact_id FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a contact entry by ID, enriched with the referenced user.
    pub async fn find_detail_by_id(&self, id: i64) -> Result<Option<ContactDetail>> {
        let row = sqlx::query(&format!("{DETAIL_SELECT} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| Self::map_detail(&r).map_err(CourrierError::from))
            .transpose()
    }

    /// Get a contact entry by its (owner, contact) pair.
    pub async fn find_pair(
        &self,
        proprietaire_id: i64,
        contact_id: i64,
    ) -> Result<Option<Contact>> {
        let result = sqlx::query_as::<_, Contact>(
            "SELECT id, proprietaire_id, contact_id FROM contacts
             WHERE proprietaire_id = ? AND contact_id = ?",
        )
        .bind(proprietaire_id)
        .bind(contact_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List an owner's contacts, ordered by the contact's last then
    /// first name.
    pub async fn list_by_owner(&self, proprietaire_id: i64) -> Result<Vec<ContactDetail>> {
        let rows = sqlx::query(&format!(
            "{DETAIL_SELECT} WHERE c.proprietaire_id = ? ORDER BY u.nom, u.prenom"
        ))
        .bind(proprietaire_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter()
            .map(|r| Self::map_detail(r).map_err(CourrierError::from))
            .collect()
    }

    /// Search an owner's contacts by name or email.
    ///
    /// Case-insensitive substring match against nom, prenom and email.
    pub async fn search(&self, proprietaire_id: i64, term: &str) -> Result<Vec<ContactDetail>> {
        let pattern = format!("%{}%", term);
        let rows = sqlx::query(&format!(
            "{DETAIL_SELECT} WHERE c.proprietaire_id = ?
             AND (u.nom LIKE ? OR u.prenom LIKE ? OR u.email LIKE ?)
             ORDER BY u.nom, u.prenom"
        ))
        .bind(proprietaire_id)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        rows.iter()
            .map(|r| Self::map_detail(r).map_err(CourrierError::from))
            .collect()
    }

    /// Delete a contact entry.
    ///
    /// Returns true if an entry was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user is in an owner's contact list.
    pub async fn is_contact(&self, proprietaire_id: i64, contact_id: i64) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE proprietaire_id = ? AND contact_id = ?)",
        )
        .bind(proprietaire_id)
        .bind(contact_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Count an owner's contacts.
    pub async fn count_by_owner(&self, proprietaire_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE proprietaire_id = ?")
                .bind(proprietaire_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count.0)
    }
}
