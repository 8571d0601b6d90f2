//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{DiscountType, Offer, OfferCreate, OfferUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, offer as offer_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_CODE_LEN: usize = 32;

fn validate_code(code: &str) -> AppResult<()> {
    validate_required_text(code, "code", MAX_CODE_LEN)?;
    let trimmed = code.trim();
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "code may only contain letters, digits, '-' and '_'",
        )
        .with_detail("field", "code"));
    }
    Ok(())
}

/// `discount_value > 0`, and at most 100 for percentages
fn validate_discount(kind: DiscountType, value: f64) -> AppResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "discount_value must be greater than 0",
        )
        .with_detail("field", "discount_value"));
    }
    if kind == DiscountType::Percentage && value > 100.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "percentage discount cannot exceed 100",
        )
        .with_detail("field", "discount_value"));
    }
    Ok(())
}

fn validate_valid_until(valid_until: i64, now: i64) -> AppResult<()> {
    if valid_until <= now {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "valid_until must be in the future",
        )
        .with_detail("field", "valid_until"));
    }
    Ok(())
}

fn duplicate_code(e: RepoError) -> AppError {
    e.or_duplicate(ErrorCode::OfferCodeExists)
}

/// GET /api/offers - active, unexpired offers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Offer>>> {
    Ok(Json(offer_repo::find_available(&state.pool, now_millis()).await?))
}

/// POST /api/offers
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<OfferCreate>,
) -> AppResult<(StatusCode, Json<Offer>)> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_code(&payload.code)?;
    validate_discount(payload.discount_type, payload.discount_value)?;
    if let Some(min) = payload.min_booking_amount {
        validate_amount(min, "min_booking_amount")?;
    }
    validate_valid_until(payload.valid_until, now_millis())?;

    let offer = offer_repo::create(&state.pool, &payload)
        .await
        .map_err(duplicate_code)?;
    tracing::info!(offer_id = offer.id, code = %offer.code, admin_id = current_user.id, "Offer created");
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PUT /api/offers/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let existing = offer_repo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OfferNotFound, format!("Offer {id} not found"))
    })?;

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(code) = &payload.code {
        validate_code(code)?;
    }
    if payload.discount_type.is_some() || payload.discount_value.is_some() {
        validate_discount(
            payload.discount_type.unwrap_or(existing.discount_type),
            payload.discount_value.unwrap_or(existing.discount_value),
        )?;
    }
    if let Some(min) = payload.min_booking_amount {
        validate_amount(min, "min_booking_amount")?;
    }
    if let Some(valid_until) = payload.valid_until {
        validate_valid_until(valid_until, now_millis())?;
    }

    let offer = offer_repo::update(&state.pool, id, &payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::OfferNotFound, msg),
            other => duplicate_code(other),
        })?;
    tracing::info!(offer_id = id, admin_id = current_user.id, "Offer updated");
    Ok(Json(offer))
}

/// DELETE /api/offers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    offer_repo::delete(&state.pool, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::OfferNotFound))?;
    tracing::info!(offer_id = id, admin_id = current_user.id, "Offer deleted");
    Ok(Json(true))
}
