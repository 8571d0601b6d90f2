//! Location API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{City, CityCreate, CityQuery, State as Region, StateCreate};

use crate::core::ServerState;
use crate::db::repository::location as location_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

async fn find_region(state: &ServerState, id: i64) -> AppResult<Region> {
    location_repo::find_state(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::StateNotFound, format!("State {id} not found")))
}

/// GET /api/locations/states - sorted by name
pub async fn list_states(State(state): State<ServerState>) -> AppResult<Json<Vec<Region>>> {
    Ok(Json(location_repo::find_states(&state.pool).await?))
}

/// POST /api/locations/states
pub async fn create_state(
    State(state): State<ServerState>,
    Json(payload): Json<StateCreate>,
) -> AppResult<(StatusCode, Json<Region>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.country, "country", MAX_NAME_LEN)?;
    validate_optional_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;

    let region = location_repo::create_state(&state.pool, &payload)
        .await
        .map_err(|e| e.or_duplicate(ErrorCode::StateNameExists))?;
    tracing::info!(state_id = region.id, name = %region.name, "State created");
    Ok((StatusCode::CREATED, Json(region)))
}

/// GET /api/locations/cities?state_id=
pub async fn list_cities(
    State(state): State<ServerState>,
    Query(query): Query<CityQuery>,
) -> AppResult<Json<Vec<City>>> {
    Ok(Json(location_repo::find_cities(&state.pool, query.state_id).await?))
}

/// GET /api/locations/states/{id}/cities
pub async fn cities_of_state(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<City>>> {
    let region = find_region(&state, id).await?;
    Ok(Json(location_repo::find_cities(&state.pool, Some(region.id)).await?))
}

/// POST /api/locations/cities
pub async fn create_city(
    State(state): State<ServerState>,
    Json(payload): Json<CityCreate>,
) -> AppResult<(StatusCode, Json<City>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;

    let region = find_region(&state, payload.state_id).await?;
    let city = location_repo::create_city(&state.pool, &region, &payload)
        .await
        .map_err(|e| e.or_duplicate(ErrorCode::CityNameExists))?;
    tracing::info!(city_id = city.id, state_id = region.id, "City created");
    Ok((StatusCode::CREATED, Json(city)))
}
