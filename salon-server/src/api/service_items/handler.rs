//! Service Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{ServiceItem, ServiceItemCreate, ServiceItemUpdate};

use crate::auth::OwnedProvider;
use crate::core::ServerState;
use crate::db::repository::{category as category_repo, service_item as service_item_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_amount, validate_optional_text,
    validate_percent, validate_range, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Longest bookable service, in minutes
const MAX_DURATION_MINS: i64 = 720;

async fn ensure_category(state: &ServerState, category_id: i64) -> AppResult<()> {
    if category_repo::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ));
    }
    Ok(())
}

fn validate_create(payload: &ServiceItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    if let Some(duration) = payload.duration_mins {
        validate_range(duration, 1, MAX_DURATION_MINS, "duration_mins")?;
    }
    if let Some(discount) = payload.discount_percent {
        validate_percent(discount, "discount_percent")?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    Ok(())
}

fn validate_update(payload: &ServiceItemUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }
    if let Some(duration) = payload.duration_mins {
        validate_range(duration, 1, MAX_DURATION_MINS, "duration_mins")?;
    }
    if let Some(discount) = payload.discount_percent {
        validate_percent(discount, "discount_percent")?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    Ok(())
}

/// GET /api/service-items - the caller's catalog, inactive items included
pub async fn list(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<Vec<ServiceItem>>> {
    let items = service_item_repo::find_by_provider(&state.pool, provider.kind, provider.id).await?;
    Ok(Json(items))
}

/// POST /api/service-items
pub async fn create(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Json(payload): Json<ServiceItemCreate>,
) -> AppResult<(StatusCode, Json<ServiceItem>)> {
    validate_create(&payload)?;
    ensure_category(&state, payload.category_id).await?;

    let item = service_item_repo::create(&state.pool, provider.kind, provider.id, &payload).await?;
    tracing::info!(item_id = item.id, provider_id = provider.id, "Service item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/service-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceItemUpdate>,
) -> AppResult<Json<ServiceItem>> {
    validate_update(&payload)?;
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    let item = service_item_repo::update(&state.pool, provider.kind, provider.id, id, &payload)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::ServiceItemNotFound))?;
    tracing::info!(item_id = id, provider_id = provider.id, "Service item updated");
    Ok(Json(item))
}

/// DELETE /api/service-items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    service_item_repo::delete(&state.pool, provider.kind, provider.id, id)
        .await
        .map_err(|e| e.or_not_found(ErrorCode::ServiceItemNotFound))?;
    tracing::info!(item_id = id, provider_id = provider.id, "Service item deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ServiceItemCreate {
        ServiceItemCreate {
            name: "Haircut".into(),
            category_id: 1,
            price: 300.0,
            duration_mins: Some(45),
            discount_percent: Some(10.0),
            description: None,
            image_url: None,
            status: None,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(validate_create(&payload()).is_ok());

        let mut p = payload();
        p.name = "  ".into();
        assert!(validate_create(&p).is_err());

        let mut p = payload();
        p.price = -1.0;
        assert!(validate_create(&p).is_err());

        let mut p = payload();
        p.duration_mins = Some(0);
        assert!(validate_create(&p).is_err());
        p.duration_mins = Some(721);
        assert!(validate_create(&p).is_err());

        let mut p = payload();
        p.discount_percent = Some(101.0);
        assert!(validate_create(&p).is_err());
    }
}
