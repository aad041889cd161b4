//! Message types for Courrier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserSummary;

/// Lifecycle status of a message, as seen by its sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum MessageStatus {
    /// Just created, recipients not yet attached.
    #[default]
    #[serde(rename = "CREATED")]
    #[sqlx(rename = "CREATED")]
    Created,
    /// Sent; one reception exists per recipient.
    #[serde(rename = "ENVOYE")]
    #[sqlx(rename = "ENVOYE")]
    Sent,
    /// Draft; can be sent later.
    #[serde(rename = "BROUILLON")]
    #[sqlx(rename = "BROUILLON")]
    Draft,
    /// Soft-deleted by the sender.
    #[serde(rename = "CORBEILLE")]
    #[sqlx(rename = "CORBEILLE")]
    Trash,
}

impl MessageStatus {
    /// Convert status to its wire/database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Created => "CREATED",
            MessageStatus::Sent => "ENVOYE",
            MessageStatus::Draft => "BROUILLON",
            MessageStatus::Trash => "CORBEILLE",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(MessageStatus::Created),
            "ENVOYE" => Ok(MessageStatus::Sent),
            "BROUILLON" => Ok(MessageStatus::Draft),
            "CORBEILLE" => Ok(MessageStatus::Trash),
            _ => Err(format!("unknown message status: {s}")),
        }
    }
}

/// A composed message.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Message {
    /// Message ID.
    pub id: i64,
    /// Sender user ID.
    pub expediteur_id: i64,
    /// Subject (optional).
    pub objet: Option<String>,
    /// Body (optional).
    pub contenu: Option<String>,
    /// Send timestamp.
    pub date_envoi: DateTime<Utc>,
    /// Lifecycle status.
    pub statut: MessageStatus,
}

/// A message enriched with its sender's summary.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithSender {
    /// The message itself.
    #[serde(flatten)]
    pub message: Message,
    /// Sender summary.
    pub expediteur: UserSummary,
}

/// New message for creation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Sender user ID.
    pub expediteur_id: i64,
    /// Subject (optional).
    pub objet: Option<String>,
    /// Body (optional).
    pub contenu: Option<String>,
    /// Initial status.
    pub statut: MessageStatus,
}

impl NewMessage {
    /// Create a new message with the given sender and status.
    pub fn new(expediteur_id: i64, statut: MessageStatus) -> Self {
        Self {
            expediteur_id,
            objet: None,
            contenu: None,
            statut,
        }
    }

    /// Set the subject.
    pub fn with_objet(mut self, objet: impl Into<String>) -> Self {
        self.objet = Some(objet.into());
        self
    }

    /// Set the body.
    pub fn with_contenu(mut self, contenu: impl Into<String>) -> Self {
        self.contenu = Some(contenu.into());
        self
    }
}

/// Message update request.
///
/// Fields left unset retain their previous value.
#[derive(Debug, Clone, Default)]
pub struct MessageUpdate {
    /// New subject.
    pub objet: Option<String>,
    /// New body.
    pub contenu: Option<String>,
    /// New status.
    pub statut: Option<MessageStatus>,
}

impl MessageUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject.
    pub fn objet(mut self, objet: impl Into<String>) -> Self {
        self.objet = Some(objet.into());
        self
    }

    /// Set the body.
    pub fn contenu(mut self, contenu: impl Into<String>) -> Self {
        self.contenu = Some(contenu.into());
        self
    }

    /// Set the status.
    pub fn statut(mut self, statut: MessageStatus) -> Self {
        self.statut = Some(statut);
        self
    }

    /// Check if the update is empty.
    pub fn is_empty(&self) -> bool {
        self.objet.is_none() && self.contenu.is_none() && self.statut.is_none()
    }
}

/// Per-status message counts for a sender.
#[derive(Debug, Clone, Serialize)]
pub struct MessageStats {
    /// All messages authored by the sender.
    pub total: i64,
    /// Messages in status ENVOYE.
    pub envoyes: i64,
    /// Messages in status BROUILLON.
    pub brouillons: i64,
    /// Messages in status CORBEILLE.
    pub corbeille: i64,
}

/// An attachment belonging to a message.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Attachment {
    /// Attachment ID.
    pub id: i64,
    /// Owning message ID.
    pub message_id: i64,
    /// Original filename.
    pub nom_fichier: String,
    /// Storage path.
    pub chemin_fichier: String,
}
