//! Response DTOs for the Web API.

use serde::Serialize;

use crate::contact::ContactDetail;
use crate::folder::{FolderSummary, FolderWithCount};
use crate::message::{Attachment, MessageStats, MessageWithSender};
use crate::reception::{ReceptionDetail, ReceptionStats};
use crate::user::PublicUser;

// ============================================================================
// Envelope
// ============================================================================

/// Generic API response envelope.
///
/// `{"success": true, "message"?: ..., "data"?: ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true for success responses.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response carrying data.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create a success response carrying data and a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response carrying only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-based).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items.
    pub total: i64,
    /// Total number of pages.
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Build pagination metadata from a page request and a total count.
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            (total + i64::from(limit) - 1) / i64::from(limit)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

// ============================================================================
// Auth payloads
// ============================================================================

/// Registration/login payload: the user plus a bearer token.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    /// The authenticated user.
    pub user: PublicUser,
    /// Signed bearer token.
    pub token: String,
}

// ============================================================================
// Message payloads
// ============================================================================

/// A page of sent messages.
#[derive(Debug, Serialize)]
pub struct MessagesPage {
    /// Messages, newest first.
    pub messages: Vec<MessageWithSender>,
    /// Pagination metadata (absent for status-filtered listings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

/// A single message with its attachments.
#[derive(Debug, Serialize)]
pub struct MessagePayload {
    /// The message.
    pub message: MessageWithSender,
    /// Its attachments.
    pub pieces_jointes: Vec<Attachment>,
}

/// Result of composing or sending a message.
#[derive(Debug, Serialize)]
pub struct ComposedPayload {
    /// The stored message.
    pub message: MessageWithSender,
    /// Number of recipients the message was delivered to.
    pub destinataires: usize,
}

/// Result of sending a draft.
#[derive(Debug, Serialize)]
pub struct SentDraftPayload {
    /// Number of recipients the draft was delivered to.
    pub destinataires: usize,
}

/// Sender-side message statistics.
pub type MessageStatsPayload = MessageStats;

// ============================================================================
// Reception payloads
// ============================================================================

/// A page of received messages.
#[derive(Debug, Serialize)]
pub struct ReceptionsPage {
    /// Receptions, newest parent message first.
    pub messages: Vec<ReceptionDetail>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// A single reception with its parent message's attachments.
#[derive(Debug, Serialize)]
pub struct ReceptionPayload {
    /// The reception, enriched.
    pub message: ReceptionDetail,
    /// Attachments of the parent message.
    pub pieces_jointes: Vec<Attachment>,
}

/// Recipient-side statistics wrapper.
#[derive(Debug, Serialize)]
pub struct ReceptionStatsPayload {
    /// Per-state counts.
    pub stats: ReceptionStats,
}

/// Result of a bulk mark-as-read.
#[derive(Debug, Serialize)]
pub struct MarkAllReadPayload {
    /// Number of receptions transitioned to LU.
    pub count: u64,
}

// ============================================================================
// Folder payloads
// ============================================================================

/// An owner's folders.
#[derive(Debug, Serialize)]
pub struct FoldersPayload {
    /// Folders with their filed-reception counts, ordered by name.
    pub dossiers: Vec<FolderWithCount>,
}

/// A single folder.
#[derive(Debug, Serialize)]
pub struct FolderPayload {
    /// The folder with its filed-reception count.
    pub dossier: FolderWithCount,
}

/// A page of receptions filed into one folder.
#[derive(Debug, Serialize)]
pub struct FolderMessagesPage {
    /// Receptions in the folder, newest parent message first.
    pub messages: Vec<ReceptionDetail>,
    /// The folder.
    pub dossier: FolderSummary,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Result of a bulk move into a folder.
#[derive(Debug, Serialize)]
pub struct MovedMessagesPayload {
    /// Number of receptions actually moved.
    pub moved: u64,
}

/// Folder statistics wrapper.
#[derive(Debug, Serialize)]
pub struct FolderStatsPayload {
    /// The statistics.
    pub stats: FolderStats,
}

/// Folder statistics.
#[derive(Debug, Serialize)]
pub struct FolderStats {
    /// Number of folders owned.
    pub total_dossiers: i64,
    /// Receptions filed across all folders.
    pub total_messages: i64,
    /// Per-folder breakdown.
    pub dossiers: Vec<FolderWithCount>,
}

// ============================================================================
// Contact payloads
// ============================================================================

/// A page of contacts.
#[derive(Debug, Serialize)]
pub struct ContactsPage {
    /// Contact entries with the referenced users.
    pub contacts: Vec<ContactDetail>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// A single contact entry.
#[derive(Debug, Serialize)]
pub struct ContactPayload {
    /// The contact entry with the referenced user.
    pub contact: ContactDetail,
}

/// Contact search results.
#[derive(Debug, Serialize)]
pub struct ContactSearchPayload {
    /// Matching contacts.
    pub contacts: Vec<ContactDetail>,
    /// The search term applied.
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of matches.
    pub count: usize,
}

/// A user matched by a directory search, flagged if already a contact.
#[derive(Debug, Serialize)]
pub struct UserWithContactFlag {
    /// The user.
    #[serde(flatten)]
    pub user: PublicUser,
    /// Whether the caller already has this user as a contact.
    #[serde(rename = "isContact")]
    pub is_contact: bool,
}

/// User directory search results.
#[derive(Debug, Serialize)]
pub struct UserSearchPayload {
    /// Matching users.
    pub users: Vec<UserWithContactFlag>,
    /// The search term applied.
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of matches.
    pub count: usize,
}

/// Contact existence check result.
#[derive(Debug, Serialize)]
pub struct ContactCheckPayload {
    /// Whether the user is in the caller's contact list.
    #[serde(rename = "isContact")]
    pub is_contact: bool,
    /// The checked user.
    pub user: PublicUser,
}

/// Contact statistics wrapper.
#[derive(Debug, Serialize)]
pub struct ContactStatsPayload {
    /// The statistics.
    pub stats: ContactStats,
}

/// Contact statistics.
#[derive(Debug, Serialize)]
pub struct ContactStats {
    /// Number of contacts owned.
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let response = ApiResponse::new(42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_envelope_message_only() {
        let response = ApiResponse::message_only("done");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);

        let meta = PaginationMeta::new(1, 10, 10);
        assert_eq!(meta.total_pages, 1);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalPages"], 1);
    }
}
