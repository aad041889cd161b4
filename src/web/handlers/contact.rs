//! Contact handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::contact::ContactRepository;
use crate::user::UserRepository;
use crate::web::dto::{
    AddContactRequest, ApiResponse, ContactCheckPayload, ContactPayload, ContactSearchPayload,
    ContactStats, ContactStatsPayload, ContactsPage, PaginationMeta, PaginationQuery, SearchQuery,
    UserSearchPayload, UserWithContactFlag, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// GET /api/contacts - List the caller's contacts.
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<ContactsPage>>, ApiError> {
    let repo = ContactRepository::new(state.db.pool());

    let contacts = repo.list_by_owner(user.id).await?;
    let total = contacts.len() as i64;

    let (page, limit) = query.clamped();
    let start = ((page - 1) * limit) as usize;
    let contacts = contacts
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    Ok(Json(ApiResponse::new(ContactsPage {
        contacts,
        pagination: PaginationMeta::new(page, limit, total),
    })))
}

/// GET /api/contacts/stats - Contact count for the caller.
pub async fn contact_stats(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<ContactStatsPayload>>, ApiError> {
    let total = ContactRepository::new(state.db.pool())
        .count_by_owner(user.id)
        .await?;
    Ok(Json(ApiResponse::new(ContactStatsPayload {
        stats: ContactStats { total },
    })))
}

/// POST /api/contacts - Add a user to the caller's contacts.
pub async fn add_contact(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<AddContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactPayload>>), ApiError> {
    let users = UserRepository::new(state.db.pool());
    if !users.exists(req.contact_id).await? {
        return Err(ApiError::not_found("user not found"));
    }

    if req.contact_id == user.id {
        return Err(ApiError::validation(
            "you cannot add yourself as a contact",
        ));
    }

    let repo = ContactRepository::new(state.db.pool());
    if repo.find_pair(user.id, req.contact_id).await?.is_some() {
        return Err(ApiError::validation(
            "this contact is already in your list",
        ));
    }

    let created = repo.create(user.id, req.contact_id).await?;
    let contact = repo
        .find_detail_by_id(created.id)
        .await?
        .ok_or_else(|| ApiError::not_found("contact not found"))?;

    let response =
        ApiResponse::with_message("contact added successfully", ContactPayload { contact });
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/contacts/search?q= - Search the caller's contacts.
pub async fn search_contacts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<ContactSearchPayload>>, ApiError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(ApiError::validation("a search term is required"));
    }

    let contacts = ContactRepository::new(state.db.pool())
        .search(user.id, term)
        .await?;

    Ok(Json(ApiResponse::new(ContactSearchPayload {
        count: contacts.len(),
        contacts,
        search_term: term.to_string(),
    })))
}

/// GET /api/contacts/search-users?q= - Search users to add as contacts.
///
/// Matches every registered user except the caller, each flagged with
/// whether they are already a contact.
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<UserSearchPayload>>, ApiError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(ApiError::validation("a search term is required"));
    }

    let matches = UserRepository::new(state.db.pool())
        .search_except(term, user.id)
        .await?;

    let contacts = ContactRepository::new(state.db.pool());
    let mut users = Vec::with_capacity(matches.len());
    for matched in matches {
        let is_contact = contacts.is_contact(user.id, matched.id).await?;
        users.push(UserWithContactFlag {
            user: matched,
            is_contact,
        });
    }

    Ok(Json(ApiResponse::new(UserSearchPayload {
        count: users.len(),
        users,
        search_term: term.to_string(),
    })))
}

/// GET /api/contacts/check/:user_id - Is this user in the caller's contacts?
pub async fn check_contact(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<ContactCheckPayload>>, ApiError> {
    let checked = UserRepository::new(state.db.pool())
        .find_public_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let is_contact = ContactRepository::new(state.db.pool())
        .is_contact(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::new(ContactCheckPayload {
        is_contact,
        user: checked,
    })))
}

/// GET /api/contacts/:id - A single contact entry.
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ContactPayload>>, ApiError> {
    let repo = ContactRepository::new(state.db.pool());

    let contact = repo
        .find_detail_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("contact not found"))?;

    if contact.proprietaire_id != user.id {
        return Err(ApiError::forbidden("not the owner of this contact"));
    }

    Ok(Json(ApiResponse::new(ContactPayload { contact })))
}

/// DELETE /api/contacts/:id - Remove a contact entry.
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = ContactRepository::new(state.db.pool());

    let contact = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("contact not found"))?;

    if contact.proprietaire_id != user.id {
        return Err(ApiError::forbidden("not the owner of this contact"));
    }

    repo.delete(id).await?;

    Ok(Json(ApiResponse::message_only("contact deleted successfully")))
}
