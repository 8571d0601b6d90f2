//! Independent Professional API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    Gender, HomeProfessionalQuery, IndependentProfessional, NearbyProfessional, NearbyQuery,
    ProfessionalCard, ProfessionalDetail, ProviderKind,
};

use crate::api::salons::handler::search_point;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    addon as addon_repo, professional as professional_repo, service_item as service_item_repo,
};
use crate::geo::{self, BoundingBox};
use crate::utils::{AppError, AppResult, ErrorCode};

const HOME_LIMIT: i64 = 5;

/// Home filter to gender: `None` lists every gender
fn home_gender(raw: Option<&str>) -> AppResult<Option<Gender>> {
    match raw.map(str::trim) {
        Some("men") => Ok(Some(Gender::Male)),
        Some("women") => Ok(Some(Gender::Female)),
        Some("unisex") | None => Ok(None),
        Some(other) => Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("unknown professional category: {other}"),
        )
        .with_detail("field", "category")),
    }
}

/// GET /api/professionals/home?category=men|women|unisex
pub async fn home(
    State(state): State<ServerState>,
    Query(query): Query<HomeProfessionalQuery>,
) -> AppResult<Json<Vec<ProfessionalCard>>> {
    let gender = home_gender(query.category.as_deref())?;
    let cards = professional_repo::home(&state.pool, gender, HOME_LIMIT).await?;
    Ok(Json(cards))
}

/// GET /api/professionals/nearby - verified professionals who also travel to the caller
pub async fn nearby(
    State(state): State<ServerState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<Vec<NearbyProfessional>>> {
    let (lat, lon, radius_km) = search_point(&query, state.config.default_search_radius_km)?;

    let bounds = BoundingBox::around(lat, lon, radius_km);
    let candidates = professional_repo::find_verified_in_box(&state.pool, &bounds).await?;
    let professionals = geo::within_radius(candidates, (lat, lon), radius_km, |p| {
        (p.professional.latitude, p.professional.longitude)
    })
    .into_iter()
    // The professional's own service radius must reach the customer
    .filter(|(card, distance)| *distance <= card.professional.radius_km * 1000.0)
    .map(|(professional, distance_in_meters)| NearbyProfessional {
        professional,
        distance_in_meters,
    })
    .collect();
    Ok(Json(professionals))
}

/// GET /api/professionals/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProfessionalDetail>> {
    let professional = professional_repo::find_card(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProfessionalNotFound,
                format!("Professional {id} not found"),
            )
        })?;
    let kind = ProviderKind::IndependentProfessional;
    Ok(Json(ProfessionalDetail {
        service_items: service_item_repo::find_active_by_provider(&state.pool, kind, id).await?,
        addons: addon_repo::find_by_provider(&state.pool, kind, id).await?,
        professional,
    }))
}

/// GET /api/professionals/unverified
pub async fn unverified(State(state): State<ServerState>) -> AppResult<Json<Vec<ProfessionalCard>>> {
    Ok(Json(professional_repo::list_unverified(&state.pool).await?))
}

/// PATCH /api/professionals/{id}/verify
pub async fn verify(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<IndependentProfessional>> {
    let professional = professional_repo::set_verified(&state.pool, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::ProfessionalNotFound))?;
    tracing::info!(professional_id = id, admin_id = current_user.id, "Professional verified");
    Ok(Json(professional))
}
