//! Sent-message handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::{OwnershipGate, ResourceKind};
use crate::message::{
    AttachmentRepository, ComposeRequest, MessageRepository, MessageService, MessageStatus,
    MessageUpdate, MessageWithSender,
};
use crate::user::UserSummary;
use crate::web::dto::{
    ApiResponse, ComposedPayload, CreateMessageRequest, MessageListQuery, MessagePayload,
    MessageStatsPayload, MessagesPage, PaginationMeta, SendDraftRequest, SentDraftPayload,
    UpdateMessageRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// POST /api/messages - Compose (and possibly send) a message.
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ComposedPayload>>), ApiError> {
    if req.statut == MessageStatus::Trash {
        return Err(ApiError::validation("invalid initial status"));
    }

    let service = MessageService::new(state.db.pool());
    let (message, count) = service
        .compose(&ComposeRequest {
            expediteur_id: user.id,
            objet: req.objet,
            contenu: req.contenu,
            destinataires: req.destinataires,
            statut: req.statut,
        })
        .await?;

    let response = ApiResponse::with_message(
        "message sent successfully",
        ComposedPayload {
            message: MessageWithSender {
                message,
                expediteur: UserSummary::from(&user),
            },
            destinataires: count,
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/messages - List the caller's sent messages.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<ApiResponse<MessagesPage>>, ApiError> {
    let repo = MessageRepository::new(state.db.pool());
    let expediteur = UserSummary::from(&user);

    let (messages, pagination) = match query.statut {
        Some(statut) => {
            let messages = repo.list_by_status(user.id, statut).await?;
            (messages, None)
        }
        None => {
            let page = query.page.max(1);
            let limit = query.limit.clamp(1, 100);
            let (messages, total) = repo.list_by_sender(user.id, page, limit).await?;
            (messages, Some(PaginationMeta::new(page, limit, total)))
        }
    };

    let messages = messages
        .into_iter()
        .map(|message| MessageWithSender {
            message,
            expediteur: expediteur.clone(),
        })
        .collect();

    Ok(Json(ApiResponse::new(MessagesPage {
        messages,
        pagination,
    })))
}

/// GET /api/messages/stats - Per-status counts for the caller.
pub async fn message_stats(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MessageStatsPayload>>, ApiError> {
    let stats = MessageRepository::new(state.db.pool()).stats(user.id).await?;
    Ok(Json(ApiResponse::new(stats)))
}

/// GET /api/messages/:id - A single sent message with its attachments.
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessagePayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Message, id, user.id)
        .await?;

    let message = MessageRepository::new(state.db.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("message not found"))?;

    let pieces_jointes = AttachmentRepository::new(state.db.pool())
        .list_by_message(id)
        .await?;

    Ok(Json(ApiResponse::new(MessagePayload {
        message: MessageWithSender {
            message,
            expediteur: UserSummary::from(&user),
        },
        pieces_jointes,
    })))
}

/// PUT /api/messages/:id - Partially update a sent message.
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateMessageRequest>,
) -> Result<Json<ApiResponse<MessageWithSender>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Message, id, user.id)
        .await?;

    let mut update = MessageUpdate::new();
    update.objet = req.objet;
    update.contenu = req.contenu;
    update.statut = req.statut;

    let message = MessageRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("message not found"))?;

    Ok(Json(ApiResponse::with_message(
        "message updated successfully",
        MessageWithSender {
            message,
            expediteur: UserSummary::from(&user),
        },
    )))
}

/// DELETE /api/messages/:id - Soft-delete (trash) a sent message.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Message, id, user.id)
        .await?;

    MessageRepository::new(state.db.pool()).soft_delete(id).await?;

    Ok(Json(ApiResponse::message_only("message moved to trash")))
}

/// DELETE /api/messages/:id/permanent - Permanently delete a message.
pub async fn delete_message_permanent(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Message, id, user.id)
        .await?;

    MessageRepository::new(state.db.pool())
        .delete_permanent(id)
        .await?;

    Ok(Json(ApiResponse::message_only(
        "message permanently deleted",
    )))
}

/// POST /api/messages/:id/send - Send a draft.
pub async fn send_draft(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<SendDraftRequest>,
) -> Result<Json<ApiResponse<SentDraftPayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Message, id, user.id)
        .await?;

    let count = MessageService::new(state.db.pool())
        .send_draft(id, &req.destinataires)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "draft sent successfully",
        SentDraftPayload {
            destinataires: count,
        },
    )))
}
