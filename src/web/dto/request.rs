//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use crate::message::MessageStatus;
use crate::reception::ReceptionState;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Last name.
    #[validate(length(min = 2, max = 100, message = "last name must be 2 to 100 characters"))]
    pub nom: String,
    /// First name.
    #[validate(length(min = 2, max = 100, message = "first name must be 2 to 100 characters"))]
    pub prenom: String,
    /// Email address.
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Password (plaintext, hashed before storage).
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub mot_de_passe: String,
    /// Mobile phone number (optional).
    #[serde(default)]
    pub telephone_mobile: Option<String>,
    /// Avatar reference (optional).
    #[serde(default)]
    pub photo_profil: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub mot_de_passe: String,
}

/// Profile update request. Unset fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New last name.
    #[validate(length(min = 2, max = 100, message = "last name must be 2 to 100 characters"))]
    #[serde(default)]
    pub nom: Option<String>,
    /// New first name.
    #[validate(length(min = 2, max = 100, message = "first name must be 2 to 100 characters"))]
    #[serde(default)]
    pub prenom: Option<String>,
    /// New email address.
    #[validate(email(message = "invalid email format"))]
    #[serde(default)]
    pub email: Option<String>,
    /// New mobile phone number.
    #[serde(default)]
    pub telephone_mobile: Option<String>,
    /// New avatar reference.
    #[serde(default)]
    pub photo_profil: Option<String>,
}

/// Password change request.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "current password is required"))]
    pub ancien_mot_de_passe: String,
    /// New password.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub nouveau_mot_de_passe: String,
}

/// Message creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    /// Subject (optional).
    #[validate(length(max = 255, message = "subject must be at most 255 characters"))]
    #[serde(default)]
    pub objet: Option<String>,
    /// Body (optional).
    #[serde(default)]
    pub contenu: Option<String>,
    /// Recipient user IDs.
    #[serde(default)]
    pub destinataires: Vec<i64>,
    /// Initial status (defaults to CREATED).
    #[serde(default)]
    pub statut: MessageStatus,
}

/// Message update request. Unset fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    /// New subject.
    #[validate(length(max = 255, message = "subject must be at most 255 characters"))]
    #[serde(default)]
    pub objet: Option<String>,
    /// New body.
    #[serde(default)]
    pub contenu: Option<String>,
    /// New status.
    #[serde(default)]
    pub statut: Option<MessageStatus>,
}

/// Draft send request.
#[derive(Debug, Deserialize, Validate)]
pub struct SendDraftRequest {
    /// Recipient user IDs.
    #[validate(length(min = 1, message = "at least one recipient is required"))]
    pub destinataires: Vec<i64>,
}

/// Reception state update request.
///
/// The state arrives as a string and is validated against the closed
/// enum before persistence, so an unknown value answers 400.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStateRequest {
    /// Target state.
    pub etat: String,
}

impl UpdateStateRequest {
    /// Parse the requested state against the closed enum.
    pub fn parsed(&self) -> Result<ReceptionState, String> {
        self.etat.parse()
    }
}

/// Move-to-folder request. A null folder id unfiles the reception.
#[derive(Debug, Deserialize, Validate)]
pub struct MoveReceptionRequest {
    /// Target folder ID, or null to unfile.
    #[serde(default)]
    pub dossier_id: Option<i64>,
}

/// Folder creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 100, message = "folder name must be 1 to 100 characters"))]
    pub nom: String,
}

/// Folder rename request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 100, message = "folder name must be 1 to 100 characters"))]
    pub nom: String,
}

/// Bulk move-into-folder request.
#[derive(Debug, Deserialize, Validate)]
pub struct MoveMessagesRequest {
    /// Reception IDs to file into the folder.
    #[validate(length(min = 1, message = "a list of messages is required"))]
    pub message_ids: Vec<i64>,
}

/// Contact creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct AddContactRequest {
    /// User ID to add as a contact.
    #[validate(range(min = 1, message = "contact id must be a positive integer"))]
    pub contact_id: i64,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1 to 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    /// Clamp page and limit into their allowed ranges.
    pub fn clamped(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

/// Sent-message listing query parameters.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1 to 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Optional status filter.
    #[serde(default)]
    pub statut: Option<MessageStatus>,
}

/// Reception listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ReceptionListQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1 to 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Optional state filter.
    #[serde(default)]
    pub etat: Option<ReceptionState>,
}

/// Search query parameter.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search term.
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "john@example.com",
            "mot_de_passe": "secret1"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_bad_email() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "not-an-email",
            "mot_de_passe": "secret1"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "john@example.com",
            "mot_de_passe": "abc"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_message_defaults() {
        let request: CreateMessageRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.objet.is_none());
        assert!(request.destinataires.is_empty());
        assert_eq!(request.statut, MessageStatus::Created);
    }

    #[test]
    fn test_create_message_french_statut() {
        let request: CreateMessageRequest = serde_json::from_value(serde_json::json!({
            "statut": "BROUILLON"
        }))
        .unwrap();
        assert_eq!(request.statut, MessageStatus::Draft);
    }

    #[test]
    fn test_update_state_parsing() {
        let request: UpdateStateRequest =
            serde_json::from_value(serde_json::json!({"etat": "LU"})).unwrap();
        assert_eq!(request.parsed().unwrap(), ReceptionState::Read);

        let request: UpdateStateRequest =
            serde_json::from_value(serde_json::json!({"etat": "READ"})).unwrap();
        assert!(request.parsed().is_err());
    }

    #[test]
    fn test_pagination_clamped() {
        let query = PaginationQuery { page: 0, limit: 500 };
        assert_eq!(query.clamped(), (1, 100));

        let query = PaginationQuery::default();
        assert_eq!(query.clamped(), (1, 10));
    }

    #[test]
    fn test_move_reception_null_folder() {
        let request: MoveReceptionRequest =
            serde_json::from_value(serde_json::json!({"dossier_id": null})).unwrap();
        assert!(request.dossier_id.is_none());
    }
}
