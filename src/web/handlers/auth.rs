//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::user::{NewUser, UserRepository, UserUpdate};
use crate::web::dto::{
    ApiResponse, AuthPayload, ChangePasswordRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;
use crate::Database;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle (owns the connection pool).
    pub db: Database,
    /// JWT signing/verification keys.
    pub keys: TokenKeys,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, jwt_secret: &str, jwt_expiry_secs: u64) -> Self {
        Self {
            db,
            keys: TokenKeys::new(jwt_secret, jwt_expiry_secs),
        }
    }
}

/// POST /api/auth/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    let users = UserRepository::new(state.db.pool());

    if users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::validation("this email is already in use"));
    }

    let hash = crate::auth::hash_password(&req.mot_de_passe)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let mut new_user = NewUser::new(req.nom, req.prenom, req.email, hash);
    new_user.telephone_mobile = req.telephone_mobile;
    new_user.photo_profil = req.photo_profil;

    let user = users.create(&new_user).await?;
    let token = state.keys.issue(user.id)?;

    let response = ApiResponse::with_message(
        "user created successfully",
        AuthPayload {
            user: user.into(),
            token,
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Authenticate and obtain a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    let users = UserRepository::new(state.db.pool());

    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("incorrect email or password"))?;

    crate::auth::verify_password(&req.mot_de_passe, &user.mot_de_passe)
        .map_err(|_| ApiError::unauthorized("incorrect email or password"))?;

    let token = state.keys.issue(user.id)?;

    Ok(Json(ApiResponse::with_message(
        "login successful",
        AuthPayload {
            user: user.into(),
            token,
        },
    )))
}

/// GET /api/auth/profile - Current user's profile.
pub async fn get_profile(
    CurrentUser(user): CurrentUser,
) -> Json<ApiResponse<crate::user::PublicUser>> {
    Json(ApiResponse::new(user))
}

/// PUT /api/auth/profile - Update the current user's profile.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<crate::user::PublicUser>>, ApiError> {
    let users = UserRepository::new(state.db.pool());

    if let Some(ref email) = req.email {
        if users.email_taken_by_other(email, user.id).await? {
            return Err(ApiError::validation("this email is already in use"));
        }
    }

    let mut update = UserUpdate::new();
    update.nom = req.nom;
    update.prenom = req.prenom;
    update.email = req.email;
    update.telephone_mobile = req.telephone_mobile;
    update.photo_profil = req.photo_profil;

    let updated = users
        .update(user.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(ApiResponse::with_message(
        "profile updated successfully",
        updated.into(),
    )))
}

/// PUT /api/auth/change-password - Replace the current user's password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let users = UserRepository::new(state.db.pool());

    let full_user = users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    crate::auth::verify_password(&req.ancien_mot_de_passe, &full_user.mot_de_passe)
        .map_err(|_| ApiError::unauthorized("incorrect current password"))?;

    let new_hash = crate::auth::hash_password(&req.nouveau_mot_de_passe)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    users.change_password(user.id, &new_hash).await?;

    Ok(Json(ApiResponse::message_only(
        "password changed successfully",
    )))
}

/// GET /api/auth/verify-token - Confirm the bearer token is valid.
pub async fn verify_token(
    CurrentUser(user): CurrentUser,
) -> Json<ApiResponse<crate::user::PublicUser>> {
    Json(ApiResponse::with_message("token is valid", user))
}
