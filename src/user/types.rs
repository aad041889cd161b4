//! User types for Courrier.

use serde::Serialize;

/// User entity representing a registered account.
///
/// Carries the password hash; never serialized directly. Use
/// [`PublicUser`] for anything that leaves the process.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address (unique).
    pub email: String,
    /// Password hash (Argon2).
    pub mot_de_passe: String,
    /// Mobile phone number (optional).
    pub telephone_mobile: Option<String>,
    /// Avatar reference (optional).
    pub photo_profil: Option<String>,
}

/// Public projection of a user, without the password hash.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PublicUser {
    /// Unique user ID.
    pub id: i64,
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address.
    pub email: String,
    /// Mobile phone number (optional).
    pub telephone_mobile: Option<String>,
    /// Avatar reference (optional).
    pub photo_profil: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nom: user.nom,
            prenom: user.prenom,
            email: user.email,
            telephone_mobile: user.telephone_mobile,
            photo_profil: user.photo_profil,
        }
    }
}

/// Compact user summary embedded in message and contact payloads.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// User ID.
    pub id: i64,
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address.
    pub email: String,
}

impl From<&PublicUser> for UserSummary {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id,
            nom: user.nom.clone(),
            prenom: user.prenom.clone(),
            email: user.email.clone(),
        }
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub mot_de_passe: String,
    /// Mobile phone number (optional).
    pub telephone_mobile: Option<String>,
    /// Avatar reference (optional).
    pub photo_profil: Option<String>,
}

impl NewUser {
    /// Create a new user with the required fields.
    pub fn new(
        nom: impl Into<String>,
        prenom: impl Into<String>,
        email: impl Into<String>,
        mot_de_passe: impl Into<String>,
    ) -> Self {
        Self {
            nom: nom.into(),
            prenom: prenom.into(),
            email: email.into(),
            mot_de_passe: mot_de_passe.into(),
            telephone_mobile: None,
            photo_profil: None,
        }
    }

    /// Set the mobile phone number.
    pub fn with_telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone_mobile = Some(telephone.into());
        self
    }

    /// Set the avatar reference.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo_profil = Some(photo.into());
        self
    }
}

/// Profile update request.
///
/// Only fields that are set will be modified.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New last name.
    pub nom: Option<String>,
    /// New first name.
    pub prenom: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New mobile phone number.
    pub telephone_mobile: Option<String>,
    /// New avatar reference.
    pub photo_profil: Option<String>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the last name.
    pub fn nom(mut self, nom: impl Into<String>) -> Self {
        self.nom = Some(nom.into());
        self
    }

    /// Set the first name.
    pub fn prenom(mut self, prenom: impl Into<String>) -> Self {
        self.prenom = Some(prenom.into());
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the mobile phone number.
    pub fn telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone_mobile = Some(telephone.into());
        self
    }

    /// Set the avatar reference.
    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo_profil = Some(photo.into());
        self
    }

    /// Check if the update is empty.
    pub fn is_empty(&self) -> bool {
        self.nom.is_none()
            && self.prenom.is_none()
            && self.email.is_none()
            && self.telephone_mobile.is_none()
            && self.photo_profil.is_none()
    }
}
