//! Folder handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::{OwnershipGate, ResourceKind};
use crate::folder::{FolderRepository, FolderSummary, NewFolder};
use crate::reception::ReceptionRepository;
use crate::web::dto::{
    ApiResponse, CreateFolderRequest, FolderMessagesPage, FolderPayload, FolderStats,
    FolderStatsPayload, FoldersPayload, MoveMessagesRequest, MovedMessagesPayload,
    PaginationQuery, UpdateFolderRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// GET /api/dossiers - List the caller's folders with message counts.
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<FoldersPayload>>, ApiError> {
    let dossiers = FolderRepository::new(state.db.pool())
        .list_by_owner(user.id)
        .await?;
    Ok(Json(ApiResponse::new(FoldersPayload { dossiers })))
}

/// GET /api/dossiers/stats - Folder statistics for the caller.
pub async fn folder_stats(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<FolderStatsPayload>>, ApiError> {
    let repo = FolderRepository::new(state.db.pool());

    let dossiers = repo.list_by_owner(user.id).await?;
    let total_dossiers = repo.count_by_owner(user.id).await?;
    let total_messages = dossiers.iter().map(|d| d.nombre_messages).sum();

    Ok(Json(ApiResponse::new(FolderStatsPayload {
        stats: FolderStats {
            total_dossiers,
            total_messages,
            dossiers,
        },
    })))
}

/// POST /api/dossiers - Create a folder.
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderPayload>>), ApiError> {
    let repo = FolderRepository::new(state.db.pool());

    if repo
        .find_by_name_and_owner(&req.nom, user.id)
        .await?
        .is_some()
    {
        return Err(ApiError::validation(
            "a folder with this name already exists",
        ));
    }

    let folder = repo.create(&NewFolder::new(req.nom.as_str(), user.id)).await?;
    let dossier = repo
        .find_by_id_with_count(folder.id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    let response = ApiResponse::with_message(
        "folder created successfully",
        FolderPayload { dossier },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/dossiers/:id - A single folder with its message count.
pub async fn get_folder(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FolderPayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Folder, id, user.id)
        .await?;

    let dossier = FolderRepository::new(state.db.pool())
        .find_by_id_with_count(id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    Ok(Json(ApiResponse::new(FolderPayload { dossier })))
}

/// PUT /api/dossiers/:id - Rename a folder.
pub async fn update_folder(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> Result<Json<ApiResponse<FolderPayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Folder, id, user.id)
        .await?;

    let repo = FolderRepository::new(state.db.pool());

    // The new name must stay unique among the caller's folders
    if let Some(existing) = repo.find_by_name_and_owner(&req.nom, user.id).await? {
        if existing.id != id {
            return Err(ApiError::validation(
                "a folder with this name already exists",
            ));
        }
    }

    repo.update_name(id, &req.nom)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    let dossier = repo
        .find_by_id_with_count(id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    Ok(Json(ApiResponse::with_message(
        "folder updated successfully",
        FolderPayload { dossier },
    )))
}

/// DELETE /api/dossiers/:id - Delete a folder, unfiling its receptions.
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Folder, id, user.id)
        .await?;

    FolderRepository::new(state.db.pool()).delete(id).await?;

    Ok(Json(ApiResponse::message_only("folder deleted successfully")))
}

/// GET /api/dossiers/:id/messages - Receptions filed into a folder.
pub async fn folder_messages(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<FolderMessagesPage>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Folder, id, user.id)
        .await?;

    let folder = FolderRepository::new(state.db.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    let (page, limit) = query.clamped();
    let (messages, total) = ReceptionRepository::new(state.db.pool())
        .list_by_folder(id, page, limit)
        .await?;

    Ok(Json(ApiResponse::new(FolderMessagesPage {
        messages,
        dossier: FolderSummary {
            id: folder.id,
            nom: folder.nom,
        },
        pagination: crate::web::dto::PaginationMeta::new(page, limit, total),
    })))
}

/// POST /api/dossiers/:id/move-messages - File a batch of receptions.
///
/// Receptions not owned by the caller are silently skipped; the
/// response carries the number actually moved.
pub async fn move_messages(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<MoveMessagesRequest>,
) -> Result<Json<ApiResponse<MovedMessagesPayload>>, ApiError> {
    OwnershipGate::new(state.db.pool())
        .ensure_owner(ResourceKind::Folder, id, user.id)
        .await?;

    let repo = FolderRepository::new(state.db.pool());
    let folder = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder not found"))?;

    let moved = repo.move_many(id, &req.message_ids, user.id).await?;

    Ok(Json(ApiResponse::with_message(
        format!("{moved} messages moved to folder \"{}\"", folder.nom),
        MovedMessagesPayload { moved },
    )))
}
