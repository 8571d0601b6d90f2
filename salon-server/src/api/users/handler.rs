//! User moderation handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{AccountStatus, AdminPasswordReset, MessageResponse, User, UserListQuery};
use shared::request::Paginated;

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;
use crate::utils::validation::validate_password;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/users - paginated accounts, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<Paginated<User>>> {
    let page = query.pagination();
    let (users, total) = user_repo::list(&state.pool, query.role, &page).await?;
    Ok(Json(Paginated::new(users, total, &page)))
}

/// PATCH /api/users/{id}/verify
pub async fn verify(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = user_repo::set_verified(&state.pool, id, true)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::UserNotFound))?;
    tracing::info!(user_id = id, admin_id = current_user.id, "User verified");
    Ok(Json(user))
}

/// PATCH /api/users/{id}/block
pub async fn block(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    if id == current_user.id {
        return Err(AppError::new(ErrorCode::CannotBlockSelf));
    }
    let user = user_repo::set_status(&state.pool, id, AccountStatus::Blocked)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::UserNotFound))?;
    security_log!("INFO", "user_blocked", user_id = id, admin_id = current_user.id);
    Ok(Json(user))
}

/// PATCH /api/users/{id}/activate
pub async fn activate(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = user_repo::set_status(&state.pool, id, AccountStatus::Active)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::UserNotFound))?;
    security_log!("INFO", "user_activated", user_id = id, admin_id = current_user.id);
    Ok(Json(user))
}

/// POST /api/users/{id}/reset-password - set a password on behalf of the user
pub async fn reset_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<AdminPasswordReset>,
) -> AppResult<Json<MessageResponse>> {
    validate_password(&req.new_password)?;
    let hash = password::hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    user_repo::set_password(&state.pool, id, &hash)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::UserNotFound))?;
    security_log!("INFO", "admin_password_reset", user_id = id, admin_id = current_user.id);
    Ok(Json(MessageResponse::new("Password has been reset")))
}
