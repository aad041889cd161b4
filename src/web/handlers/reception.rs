//! Received-message handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::auth::{OwnershipGate, ResourceKind};
use crate::message::AttachmentRepository;
use crate::reception::ReceptionRepository;
use crate::web::dto::{
    ApiResponse, MarkAllReadPayload, MoveReceptionRequest, PaginationMeta, ReceptionListQuery,
    ReceptionPayload, ReceptionStatsPayload, ReceptionsPage, UpdateStateRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// GET /api/receptions - List the caller's received messages.
pub async fn list_receptions(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ReceptionListQuery>,
) -> Result<Json<ApiResponse<ReceptionsPage>>, ApiError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);

    let (messages, total) = ReceptionRepository::new(state.db.pool())
        .list_by_recipient(user.id, page, limit, query.etat)
        .await?;

    Ok(Json(ApiResponse::new(ReceptionsPage {
        messages,
        pagination: PaginationMeta::new(page, limit, total),
    })))
}

/// GET /api/receptions/stats - Per-state counts for the caller.
pub async fn reception_stats(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<ReceptionStatsPayload>>, ApiError> {
    let stats = ReceptionRepository::new(state.db.pool())
        .stats(user.id)
        .await?;
    Ok(Json(ApiResponse::new(ReceptionStatsPayload { stats })))
}

/// POST /api/receptions/mark-all-read - Mark every unread reception read.
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MarkAllReadPayload>>, ApiError> {
    let count = ReceptionRepository::new(state.db.pool())
        .mark_all_as_read(user.id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        format!("{count} messages marked as read"),
        MarkAllReadPayload { count },
    )))
}

/// GET /api/receptions/:id - A single reception with attachments.
///
/// The first read transitions a RECU reception to LU.
pub async fn get_reception(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReceptionPayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    let repo = ReceptionRepository::new(state.db.pool());

    // Reading marks an unread reception as read
    repo.mark_as_read(id).await?;

    let detail = repo
        .find_detail_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("reception not found"))?;

    let pieces_jointes = AttachmentRepository::new(state.db.pool())
        .list_by_message(detail.message_id)
        .await?;

    Ok(Json(ApiResponse::new(ReceptionPayload {
        message: detail,
        pieces_jointes,
    })))
}

/// PUT /api/receptions/:id/read - Explicitly mark a reception read.
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    ReceptionRepository::new(state.db.pool())
        .mark_as_read(id)
        .await?;

    Ok(Json(ApiResponse::message_only("message marked as read")))
}

/// PUT /api/receptions/:id/state - Set a reception's state.
pub async fn update_state(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStateRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let etat = req
        .parsed()
        .map_err(|_| ApiError::validation("invalid state"))?;

    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    ReceptionRepository::new(state.db.pool())
        .update_state(id, etat)
        .await?;

    Ok(Json(ApiResponse::message_only(format!(
        "message state set to {etat}"
    ))))
}

/// PUT /api/receptions/:id/move - File a reception into a folder.
///
/// A null folder id unfiles it. A non-null target folder must belong
/// to the caller.
pub async fn move_reception(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<MoveReceptionRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    if let Some(dossier_id) = req.dossier_id {
        OwnershipGate::new(state.db.pool())
            .ensure_owner(ResourceKind::Folder, dossier_id, user.id)
            .await?;
    }

    ReceptionRepository::new(state.db.pool())
        .move_to_folder(id, req.dossier_id)
        .await?;

    Ok(Json(ApiResponse::message_only("message moved successfully")))
}

/// DELETE /api/receptions/:id - Soft-delete (trash) a reception.
pub async fn delete_reception(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    ReceptionRepository::new(state.db.pool()).soft_delete(id).await?;

    Ok(Json(ApiResponse::message_only("message moved to trash")))
}

/// DELETE /api/receptions/:id/permanent - Permanently delete a reception.
pub async fn delete_reception_permanent(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Reception, id, user.id)
        .await?;

    ReceptionRepository::new(state.db.pool())
        .delete_permanent(id)
        .await?;

    Ok(Json(ApiResponse::message_only(
        "message permanently deleted",
    )))
}
