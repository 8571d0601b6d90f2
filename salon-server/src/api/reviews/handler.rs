//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Review, ReviewCreate, ReviewWithUser};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{review as review_repo, salon as salon_repo};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_REVIEW_IMAGES: usize = 10;

fn validate_review(payload: &ReviewCreate) -> AppResult<()> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::with_message(
            ErrorCode::ReviewInvalid,
            "rating must be between 1 and 5",
        )
        .with_detail("field", "rating"));
    }
    validate_optional_text(&payload.comment, "comment", MAX_NOTE_LEN)?;
    if payload.images.len() > MAX_REVIEW_IMAGES {
        return Err(AppError::with_message(
            ErrorCode::ReviewInvalid,
            format!("at most {MAX_REVIEW_IMAGES} images per review"),
        )
        .with_detail("field", "images"));
    }
    if payload.images.iter().any(|url| url.trim().is_empty() || url.len() > MAX_URL_LEN) {
        return Err(AppError::with_message(ErrorCode::ReviewInvalid, "invalid image url")
            .with_detail("field", "images"));
    }
    Ok(())
}

/// POST /api/reviews
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_review(&payload)?;
    if salon_repo::find_by_id(&state.pool, payload.salon_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::SalonNotFound,
            format!("Salon {} not found", payload.salon_id),
        ));
    }

    let review = review_repo::create(&state.pool, current_user.id, &payload).await?;
    tracing::info!(review_id = review.id, salon_id = review.salon_id, "Review created");
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/reviews/salon/{salon_id} - newest first
pub async fn for_salon(
    State(state): State<ServerState>,
    Path(salon_id): Path<i64>,
) -> AppResult<Json<Vec<ReviewWithUser>>> {
    Ok(Json(review_repo::find_by_salon(&state.pool, salon_id).await?))
}
