//! Salon API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    FeaturedSalon, HomeSalon, HomeSalonQuery, NearbyQuery, NearbySalon, ProviderKind, Salon,
    SalonCategory, SalonDetail, SalonLocationUpdate,
};
use shared::request::{Paginated, PaginationQuery};

use crate::auth::{CurrentUser, OwnedProvider};
use crate::core::ServerState;
use crate::db::repository::{
    addon as addon_repo, review as review_repo, salon as salon_repo,
    service_item as service_item_repo, specialist as specialist_repo,
};
use crate::geo::{self, BoundingBox};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_coordinates,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const FEATURED_DEFAULT_LIMIT: i64 = 10;
const FEATURED_MAX_LIMIT: i64 = 50;
/// Service category names shown per home card
const HOME_CATEGORY_NAMES: i64 = 3;

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HomeServiceToggled {
    pub offers_home_service: bool,
}

/// Required, finite and in range search coordinates plus the effective radius
pub(crate) fn search_point(query: &NearbyQuery, default_radius_km: f64) -> AppResult<(f64, f64, f64)> {
    let (Some(lat), Some(lon)) = (query.latitude, query.longitude) else {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "latitude and longitude are required",
        ));
    };
    validate_coordinates(lat, lon)?;
    let radius = match query.radius_km {
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(_) => {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "radius_km must be a positive number",
            ));
        }
        None => default_radius_km,
    };
    Ok((lat, lon, radius))
}

fn parse_category(raw: &str) -> AppResult<SalonCategory> {
    raw.trim()
        .parse::<SalonCategory>()
        .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e).with_detail("field", "category"))
}

/// GET /api/salons/nearby - verified salons within a radius, nearest first
pub async fn nearby(
    State(state): State<ServerState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<Vec<NearbySalon>>> {
    let (lat, lon, radius_km) = search_point(&query, state.config.default_search_radius_km)?;
    let category = query.category.as_deref().map(parse_category).transpose()?;

    let bounds = BoundingBox::around(lat, lon, radius_km);
    let candidates = salon_repo::find_verified_in_box(&state.pool, &bounds, category).await?;
    let salons = geo::within_radius(candidates, (lat, lon), radius_km, |s| (s.latitude, s.longitude))
        .into_iter()
        .map(|(salon, distance_in_meters)| NearbySalon {
            salon,
            distance_in_meters,
        })
        .collect();
    Ok(Json(salons))
}

/// GET /api/salons/featured - best rated verified salons
pub async fn featured(
    State(state): State<ServerState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<Vec<FeaturedSalon>>> {
    let limit = query
        .limit
        .unwrap_or(FEATURED_DEFAULT_LIMIT)
        .clamp(1, FEATURED_MAX_LIMIT);
    let salons = salon_repo::featured(&state.pool, limit).await?;
    Ok(Json(salons))
}

/// GET /api/salons/home?category= - verified salons of one category
pub async fn home(
    State(state): State<ServerState>,
    Query(query): Query<HomeSalonQuery>,
) -> AppResult<Json<Vec<HomeSalon>>> {
    let raw = query.category.as_deref().ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "category is required")
            .with_detail("field", "category")
    })?;
    let category = parse_category(raw)?;

    let salons = salon_repo::find_verified_by_category(&state.pool, category).await?;
    let mut cards = Vec::with_capacity(salons.len());
    for salon in salons {
        let service_categories =
            salon_repo::service_category_names(&state.pool, salon.id, HOME_CATEGORY_NAMES).await?;
        cards.push(HomeSalon {
            salon,
            service_categories,
        });
    }
    Ok(Json(cards))
}

/// GET /api/salons/{id} - public salon page
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SalonDetail>> {
    let salon = find_salon(&state, id).await?;
    Ok(Json(detail(&state, salon, false).await?))
}

/// GET /api/salons/mine - the caller's salon, inactive services included
pub async fn mine(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<SalonDetail>> {
    let salon = find_salon(&state, provider.salon_id()?).await?;
    Ok(Json(detail(&state, salon, true).await?))
}

/// PATCH /api/salons/mine/home-service - flip home service availability
pub async fn toggle_home_service(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<HomeServiceToggled>> {
    let salon_id = provider.salon_id()?;
    let offers_home_service = salon_repo::toggle_home_service(&state.pool, salon_id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::SalonNotFound))?;
    tracing::info!(salon_id, offers_home_service, "Home service toggled");
    Ok(Json(HomeServiceToggled {
        offers_home_service,
    }))
}

/// PUT /api/salons/{id}/location - correct coordinates and address
pub async fn update_location(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SalonLocationUpdate>,
) -> AppResult<Json<Salon>> {
    let (Some(lat), Some(lon)) = (payload.latitude, payload.longitude) else {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "latitude and longitude are required",
        ));
    };
    validate_coordinates(lat, lon)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.city, "city", MAX_NAME_LEN)?;
    validate_optional_text(&payload.state, "state", MAX_NAME_LEN)?;
    validate_optional_text(&payload.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;

    let salon = find_salon(&state, id).await?;
    if salon.owner_id != current_user.id && !current_user.is_admin() {
        crate::security_log!(
            "WARN",
            "salon_location_denied",
            user_id = current_user.id,
            salon_id = id
        );
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    let salon = salon_repo::update_location(&state.pool, id, lat, lon, &payload)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::SalonNotFound))?;
    tracing::info!(salon_id = id, user_id = current_user.id, "Salon location updated");
    Ok(Json(salon))
}

/// GET /api/salons - all salons, paginated
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<Salon>>> {
    let (salons, total) = salon_repo::list(&state.pool, &page).await?;
    Ok(Json(Paginated::new(salons, total, &page)))
}

/// GET /api/salons/unverified - salons awaiting review
pub async fn unverified(State(state): State<ServerState>) -> AppResult<Json<Vec<Salon>>> {
    Ok(Json(salon_repo::list_unverified(&state.pool).await?))
}

/// PATCH /api/salons/{id}/verify
pub async fn verify(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Salon>> {
    let salon = salon_repo::set_verified(&state.pool, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::SalonNotFound))?;
    tracing::info!(salon_id = id, admin_id = current_user.id, "Salon verified");
    Ok(Json(salon))
}

async fn find_salon(state: &ServerState, id: i64) -> AppResult<Salon> {
    salon_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::SalonNotFound, format!("Salon {id} not found")))
}

async fn detail(state: &ServerState, salon: Salon, include_inactive: bool) -> AppResult<SalonDetail> {
    let pool = &state.pool;
    let service_items = if include_inactive {
        service_item_repo::find_by_provider(pool, ProviderKind::Salon, salon.id).await?
    } else {
        service_item_repo::find_active_by_provider(pool, ProviderKind::Salon, salon.id).await?
    };
    Ok(SalonDetail {
        specialists: specialist_repo::find_by_salon(pool, salon.id).await?,
        service_items,
        addons: addon_repo::find_by_provider(pool, ProviderKind::Salon, salon.id).await?,
        reviews: review_repo::find_by_salon(pool, salon.id).await?,
        salon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<f64>, lon: Option<f64>, radius: Option<f64>) -> NearbyQuery {
        NearbyQuery {
            latitude: lat,
            longitude: lon,
            radius_km: radius,
            category: None,
        }
    }

    #[test]
    fn test_search_point_defaults_radius() {
        let (lat, lon, r) = search_point(&query(Some(12.9), Some(77.6), None), 5.0).unwrap();
        assert_eq!((lat, lon, r), (12.9, 77.6, 5.0));
    }

    #[test]
    fn test_search_point_rejections() {
        let missing = search_point(&query(Some(12.9), None, None), 5.0).unwrap_err();
        assert_eq!(missing.code, ErrorCode::InvalidCoordinates);
        assert!(search_point(&query(Some(95.0), Some(0.0), None), 5.0).is_err());
        assert!(search_point(&query(Some(f64::NAN), Some(0.0), None), 5.0).is_err());
        assert!(search_point(&query(Some(1.0), Some(1.0), Some(-2.0)), 5.0).is_err());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(parse_category(" spa ").unwrap(), SalonCategory::Spa);
        assert_eq!(parse_category("barber").unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
