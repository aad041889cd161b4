//! User repository for Courrier.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::{QueryBuilder, SqlitePool};

use super::types::{NewUser, PublicUser, User, UserUpdate};
use crate::{CourrierError, Result};

const USER_COLUMNS: &str =
    "id, nom, prenom, email, mot_de_passe, telephone_mobile, photo_profil";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// The password must already be hashed. Returns the created user
    /// with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (nom, prenom, email, mot_de_passe, telephone_mobile, photo_profil)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.nom)
        .bind(&new_user.prenom)
        .bind(&new_user.email)
        .bind(&new_user.mot_de_passe)
        .bind(&new_user.telephone_mobile)
        .bind(&new_user.photo_profil)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CourrierError::NotFound("user".to_string()))
    }

    /// Get a user by ID, including the password hash.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by ID without the password hash.
    pub async fn find_public_by_id(&self, id: i64) -> Result<Option<PublicUser>> {
        let result = sqlx::query_as::<_, PublicUser>(
            "SELECT id, nom, prenom, email, telephone_mobile, photo_profil
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Check whether an email is already registered to a different user.
    pub async fn email_taken_by_other(&self, email: &str, user_id: i64) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND id != ?)")
                .bind(email)
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists.0)
    }

    /// Check whether a user with this id exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists.0)
    }

    /// Update a user's profile by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref nom) = update.nom {
            separated.push("nom = ");
            separated.push_bind_unseparated(nom);
        }
        if let Some(ref prenom) = update.prenom {
            separated.push("prenom = ");
            separated.push_bind_unseparated(prenom);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref telephone) = update.telephone_mobile {
            separated.push("telephone_mobile = ");
            separated.push_bind_unseparated(telephone);
        }
        if let Some(ref photo) = update.photo_profil {
            separated.push("photo_profil = ");
            separated.push_bind_unseparated(photo);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Replace the stored password hash for a user.
    ///
    /// Returns true if a user was updated, false if not found.
    pub async fn change_password(&self, id: i64, new_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET mot_de_passe = ? WHERE id = ?")
            .bind(new_hash)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search users by name or email, excluding one user (the caller).
    ///
    /// Case-insensitive substring match against nom, prenom and email.
    pub async fn search_except(&self, term: &str, exclude_id: i64) -> Result<Vec<PublicUser>> {
        let pattern = format!("%{}%", term);
        let users = sqlx::query_as::<_, PublicUser>(
            "SELECT id, nom, prenom, email, telephone_mobile, photo_profil
             FROM users
             WHERE id != ? AND (nom LIKE ? OR prenom LIKE ? OR email LIKE ?)
             ORDER BY nom, prenom",
        )
        .bind(exclude_id)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
