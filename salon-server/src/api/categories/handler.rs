//! Service Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{Category, CategoryCreate, CategoryQuery, CategoryUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    RepoError, category as category_repo, service_item as service_item_repo,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/categories - active categories
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = category_repo::find_active(&state.pool, query.gender).await?;
    Ok(Json(categories))
}

/// GET /api/categories/all - including inactive
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category_repo::find_all(&state.pool).await?))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.icon, "icon", MAX_URL_LEN)?;

    if category_repo::name_taken(&state.pool, payload.name.trim(), payload.gender, None).await? {
        return Err(AppError::new(ErrorCode::CategoryNameExists));
    }

    let category = category_repo::create(&state.pool, &payload)
        .await
        .map_err(|e| e.or_duplicate(ErrorCode::CategoryNameExists))?;
    tracing::info!(category_id = category.id, admin_id = current_user.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.icon, "icon", MAX_URL_LEN)?;

    let existing = category_repo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
    })?;

    // The (name, gender) pair after the update must stay unique
    let name = payload.name.as_deref().map_or(existing.name.as_str(), str::trim);
    let gender = payload.gender.unwrap_or(existing.gender);
    if category_repo::name_taken(&state.pool, name, gender, Some(id)).await? {
        return Err(AppError::new(ErrorCode::CategoryNameExists));
    }

    let category = category_repo::update(&state.pool, id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
            other => other.or_not_found(ErrorCode::CategoryNotFound),
        })?;
    tracing::info!(category_id = id, admin_id = current_user.id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - refused while service items use it
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let in_use = service_item_repo::count_by_category(&state.pool, id).await?;
    if in_use > 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryInUse,
            format!("Category is used by {in_use} service items"),
        ));
    }
    category_repo::delete(&state.pool, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::CategoryNotFound))?;
    tracing::info!(category_id = id, admin_id = current_user.id, "Category deleted");
    Ok(Json(true))
}
