//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use shared::models::{
    Booking, BookingCancel, BookingDetail, BookingRating, BookingStatus, BookingStatusUpdate,
    CartBookingRequest, CartBookingResponse, ProviderKind, SalonBookingQuery,
};
use shared::util::now_millis;

use crate::auth::{CurrentUser, OwnedProvider};
use crate::booking::book_cart;
use crate::core::ServerState;
use crate::db::repository::{
    RepoError, booking as booking_repo, professional as professional_repo, salon as salon_repo,
};
use crate::security_log;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_range};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/bookings - book every salon in the cart at once
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(req): Json<CartBookingRequest>,
) -> AppResult<(StatusCode, Json<CartBookingResponse>)> {
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    let today = Utc::now().date_naive();
    let bookings = book_cart(&state.pool, current_user.id, &req, today, now_millis()).await?;
    Ok((StatusCode::CREATED, Json(CartBookingResponse { bookings })))
}

/// GET /api/bookings/mine - the caller's bookings, newest first
pub async fn mine(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<BookingDetail>>> {
    let bookings = booking_repo::find_for_customer(&state.pool, current_user.id).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/salon?date=&status= - bookings at the caller's salon
pub async fn for_salon(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Query(query): Query<SalonBookingQuery>,
) -> AppResult<Json<Vec<BookingDetail>>> {
    let salon_id = provider.salon_id()?;
    if let Some(date) = &query.date {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, "date must be YYYY-MM-DD")
                .with_detail("field", "date")
        })?;
    }
    let bookings = booking_repo::find_for_provider(
        &state.pool,
        ProviderKind::Salon,
        salon_id,
        query.date.as_deref(),
        query.status,
    )
    .await?;
    Ok(Json(bookings))
}

/// PATCH /api/bookings/{id}/status - move a booking along its lifecycle
pub async fn update_status(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<BookingStatusUpdate>,
) -> AppResult<Json<Booking>> {
    let booking = find_booking(&state, id).await?;
    if !current_user.is_admin() && !owns_provider(&state, &booking, &current_user).await? {
        return Err(denied(&current_user, id));
    }

    let from = booking.status;
    if !from.can_transition_to(req.status) {
        return Err(invalid_transition(from, req.status));
    }

    let booking = booking_repo::update_status(&state.pool, id, from, req.status)
        .await
        .map_err(|e| match e {
            RepoError::Validation(_) => invalid_transition(from, req.status),
            other => other.into(),
        })?;
    tracing::info!(
        booking_id = id,
        user_id = current_user.id,
        from = from.as_str(),
        to = req.status.as_str(),
        "Booking status changed"
    );
    Ok(Json(booking))
}

/// PATCH /api/bookings/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<BookingCancel>,
) -> AppResult<Json<Booking>> {
    validate_optional_text(&req.reason, "reason", MAX_NOTE_LEN)?;

    let booking = find_booking(&state, id).await?;
    let is_customer = booking.customer_id == current_user.id;
    if !is_customer && !owns_provider(&state, &booking, &current_user).await? {
        return Err(denied(&current_user, id));
    }
    if !booking.status.is_cancellable() {
        return Err(not_cancellable(booking.status));
    }

    let reason = req.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let cancelled = booking_repo::cancel(&state.pool, id, reason)
        .await?
        .ok_or_else(|| not_cancellable(booking.status))?;
    tracing::info!(booking_id = id, user_id = current_user.id, "Booking cancelled");
    Ok(Json(cancelled))
}

/// POST /api/bookings/{id}/rating
pub async fn rate(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<BookingRating>,
) -> AppResult<Json<Booking>> {
    validate_range(req.score, 1, 5, "score")?;
    validate_optional_text(&req.feedback, "feedback", MAX_NOTE_LEN)?;

    let booking = find_booking(&state, id).await?;
    if booking.customer_id != current_user.id {
        return Err(denied(&current_user, id));
    }
    if booking.status != BookingStatus::Completed {
        return Err(AppError::with_message(
            ErrorCode::BookingNotCompleted,
            "Only completed bookings can be rated",
        ));
    }
    if booking.rating_score.is_some() {
        return Err(AppError::new(ErrorCode::BookingAlreadyRated));
    }

    let rated = booking_repo::rate(&state.pool, id, req.score, req.feedback.as_deref())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingAlreadyRated))?;
    tracing::info!(booking_id = id, score = req.score, "Booking rated");
    Ok(Json(rated))
}

async fn find_booking(state: &ServerState, id: i64) -> AppResult<Booking> {
    booking_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found")))
}

/// Does the caller own the salon or professional profile the booking is with?
async fn owns_provider(state: &ServerState, booking: &Booking, user: &CurrentUser) -> AppResult<bool> {
    let owner = match booking.provider_type {
        ProviderKind::Salon => salon_repo::find_by_id(&state.pool, booking.provider_id)
            .await?
            .map(|s| s.owner_id),
        ProviderKind::IndependentProfessional => {
            professional_repo::find_by_id(&state.pool, booking.provider_id)
                .await?
                .map(|p| p.user_id)
        }
    };
    Ok(owner == Some(user.id))
}

fn denied(user: &CurrentUser, booking_id: i64) -> AppError {
    security_log!("WARN", "booking_access_denied", user_id = user.id, booking_id = booking_id);
    AppError::new(ErrorCode::NotResourceOwner)
}

fn invalid_transition(from: BookingStatus, to: BookingStatus) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("Cannot move a booking from {} to {}", from.as_str(), to.as_str()),
    )
}

fn not_cancellable(status: BookingStatus) -> AppError {
    AppError::with_message(
        ErrorCode::BookingNotCancellable,
        format!("A {} booking cannot be cancelled", status.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            invalid_transition(BookingStatus::Pending, BookingStatus::Completed).code,
            ErrorCode::InvalidStatusTransition
        );
        let err = not_cancellable(BookingStatus::InProgress);
        assert_eq!(err.code, ErrorCode::BookingNotCancellable);
        assert!(err.message.contains("in_progress"));
    }
}
