//! Add-on API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{AddOn, AddOnCreate, AddOnUpdate};

use crate::auth::OwnedProvider;
use crate::core::ServerState;
use crate::db::repository::addon as addon_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_amount, validate_optional_text, validate_range,
    validate_required_text,
};
use crate::utils::{AppResult, ErrorCode};

const MAX_DURATION_MINS: i64 = 720;

fn check_price_and_duration(price: Option<f64>, duration_mins: Option<i64>) -> AppResult<()> {
    if let Some(price) = price {
        validate_amount(price, "price")?;
    }
    if let Some(duration) = duration_mins {
        validate_range(duration, 0, MAX_DURATION_MINS, "duration_mins")?;
    }
    Ok(())
}

/// GET /api/addons
pub async fn list(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<Vec<AddOn>>> {
    let addons = addon_repo::find_by_provider(&state.pool, provider.kind, provider.id).await?;
    Ok(Json(addons))
}

/// POST /api/addons
pub async fn create(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Json(payload): Json<AddOnCreate>,
) -> AppResult<(StatusCode, Json<AddOn>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    check_price_and_duration(Some(payload.price), payload.duration_mins)?;

    let addon = addon_repo::create(&state.pool, provider.kind, provider.id, &payload).await?;
    tracing::info!(addon_id = addon.id, provider_id = provider.id, "Add-on created");
    Ok((StatusCode::CREATED, Json(addon)))
}

/// PUT /api/addons/{id}
pub async fn update(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
    Json(payload): Json<AddOnUpdate>,
) -> AppResult<Json<AddOn>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    check_price_and_duration(payload.price, payload.duration_mins)?;

    let addon = addon_repo::update(&state.pool, provider.kind, provider.id, id, &payload)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::AddonNotFound))?;
    Ok(Json(addon))
}

/// DELETE /api/addons/{id}
pub async fn delete(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    addon_repo::delete(&state.pool, provider.kind, provider.id, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::AddonNotFound))?;
    tracing::info!(addon_id = id, provider_id = provider.id, "Add-on deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_and_duration_bounds() {
        assert!(check_price_and_duration(Some(0.0), Some(0)).is_ok());
        assert!(check_price_and_duration(None, None).is_ok());
        assert!(check_price_and_duration(Some(-5.0), None).is_err());
        assert!(check_price_and_duration(Some(f64::INFINITY), None).is_err());
        assert!(check_price_and_duration(None, Some(-1)).is_err());
    }
}
