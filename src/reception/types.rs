//! Reception types for Courrier.
//!
//! A reception is the per-recipient delivery record of a message,
//! carrying its own read/archive/trash state independent of the
//! sender's copy.

use serde::{Deserialize, Serialize};

use crate::folder::FolderSummary;
use crate::message::MessageWithSender;

/// State of a reception, as seen by its recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum ReceptionState {
    /// Delivered, not yet read.
    #[default]
    #[serde(rename = "RECU")]
    #[sqlx(rename = "RECU")]
    Received,
    /// Read by the recipient.
    #[serde(rename = "LU")]
    #[sqlx(rename = "LU")]
    Read,
    /// Marked deleted.
    #[serde(rename = "SUPPRIME")]
    #[sqlx(rename = "SUPPRIME")]
    Deleted,
    /// Archived.
    #[serde(rename = "ARCHIVE")]
    #[sqlx(rename = "ARCHIVE")]
    Archived,
    /// Soft-deleted to the trash.
    #[serde(rename = "CORBEILLE")]
    #[sqlx(rename = "CORBEILLE")]
    Trash,
}

impl ReceptionState {
    /// Convert state to its wire/database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceptionState::Received => "RECU",
            ReceptionState::Read => "LU",
            ReceptionState::Deleted => "SUPPRIME",
            ReceptionState::Archived => "ARCHIVE",
            ReceptionState::Trash => "CORBEILLE",
        }
    }
}

impl std::fmt::Display for ReceptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReceptionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECU" => Ok(ReceptionState::Received),
            "LU" => Ok(ReceptionState::Read),
            "SUPPRIME" => Ok(ReceptionState::Deleted),
            "ARCHIVE" => Ok(ReceptionState::Archived),
            "CORBEILLE" => Ok(ReceptionState::Trash),
            _ => Err(format!("unknown reception state: {s}")),
        }
    }
}

/// A delivery record for one (message, recipient) pair.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reception {
    /// Reception ID.
    pub id: i64,
    /// Parent message ID.
    pub message_id: i64,
    /// Recipient user ID.
    pub destinataire_id: i64,
    /// Reception state.
    pub etat: ReceptionState,
    /// Folder the reception is filed into, if any.
    pub dossier_id: Option<i64>,
}

/// A reception enriched with its parent message, the message's sender,
/// and its folder (if any).
#[derive(Debug, Clone, Serialize)]
pub struct ReceptionDetail {
    /// Reception ID.
    pub id: i64,
    /// Parent message ID.
    pub message_id: i64,
    /// Recipient user ID.
    pub destinataire_id: i64,
    /// Reception state.
    pub etat: ReceptionState,
    /// Folder the reception is filed into, if any.
    pub dossier_id: Option<i64>,
    /// Parent message with its sender summary.
    pub message: MessageWithSender,
    /// Folder summary, if filed.
    pub dossier: Option<FolderSummary>,
}

/// Per-state reception counts for a recipient.
#[derive(Debug, Clone, Serialize)]
pub struct ReceptionStats {
    /// Receptions in state RECU.
    pub recus: i64,
    /// Receptions in state LU.
    pub lus: i64,
    /// Unread count (state RECU).
    pub non_lus: i64,
    /// Receptions in state ARCHIVE.
    pub archives: i64,
    /// Receptions in state CORBEILLE.
    pub corbeille: i64,
    /// All receptions for the recipient.
    pub total: i64,
}
