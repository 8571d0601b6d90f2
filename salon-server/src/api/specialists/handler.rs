//! Specialist API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Specialist, SpecialistCreate, SpecialistUpdate};

use crate::auth::OwnedProvider;
use crate::core::ServerState;
use crate::db::repository::specialist as specialist_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_phone,
    validate_range, validate_required_text, validate_schedule,
};
use crate::utils::{AppResult, ErrorCode};

const MAX_EXPERIENCE_YEARS: i64 = 80;

fn validate_contact(contact: &Option<String>) -> AppResult<()> {
    if let Some(number) = contact {
        validate_phone(number)?;
    }
    Ok(())
}

fn validate_certifications(certifications: &[String]) -> AppResult<()> {
    for cert in certifications {
        validate_required_text(cert, "certifications", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// GET /api/specialists
pub async fn list(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<Vec<Specialist>>> {
    let salon_id = provider.salon_id()?;
    Ok(Json(specialist_repo::find_by_salon(&state.pool, salon_id).await?))
}

/// POST /api/specialists
pub async fn create(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Json(payload): Json<SpecialistCreate>,
) -> AppResult<(StatusCode, Json<Specialist>)> {
    let salon_id = provider.salon_id()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_contact(&payload.contact_number)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(years) = payload.experience_years {
        validate_range(years, 0, MAX_EXPERIENCE_YEARS, "experience_years")?;
    }
    validate_certifications(&payload.certifications)?;
    validate_schedule(&payload.availability, "availability")?;

    let specialist = specialist_repo::create(&state.pool, salon_id, &payload).await?;
    tracing::info!(specialist_id = specialist.id, salon_id, "Specialist created");
    Ok((StatusCode::CREATED, Json(specialist)))
}

/// PUT /api/specialists/{id}
pub async fn update(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
    Json(payload): Json<SpecialistUpdate>,
) -> AppResult<Json<Specialist>> {
    let salon_id = provider.salon_id()?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_contact(&payload.contact_number)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(years) = payload.experience_years {
        validate_range(years, 0, MAX_EXPERIENCE_YEARS, "experience_years")?;
    }
    if let Some(certifications) = &payload.certifications {
        validate_certifications(certifications)?;
    }
    if let Some(availability) = &payload.availability {
        validate_schedule(availability, "availability")?;
    }

    let specialist = specialist_repo::update(&state.pool, salon_id, id, &payload)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::SpecialistNotFound))?;
    Ok(Json(specialist))
}

/// DELETE /api/specialists/{id}
pub async fn delete(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let salon_id = provider.salon_id()?;
    specialist_repo::delete(&state.pool, salon_id, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::SpecialistNotFound))?;
    tracing::info!(specialist_id = id, salon_id, "Specialist deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certification_entries_must_be_named() {
        assert!(validate_certifications(&["Level 2 Colourist".into()]).is_ok());
        assert!(validate_certifications(&[" ".into()]).is_err());
    }
}
