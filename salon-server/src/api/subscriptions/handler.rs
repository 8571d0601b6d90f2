//! Subscription API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{
    SubscribeRequest, SubscriptionPlan, SubscriptionPlanCreate, SubscriptionStatus,
    SubscriptionStatusView,
};
use shared::util::now_millis;

use crate::auth::{CurrentUser, OwnedProvider};
use crate::core::ServerState;
use crate::db::repository::subscription as subscription_repo;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Ten years
const MAX_DURATION_DAYS: i64 = 3650;

fn validate_plan(payload: &SubscriptionPlanCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    if payload.duration_in_days <= 0 || payload.duration_in_days > MAX_DURATION_DAYS {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("duration_in_days must be between 1 and {MAX_DURATION_DAYS}"),
        )
        .with_detail("field", "duration_in_days"));
    }
    for feature in &payload.features {
        validate_required_text(feature, "features", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// GET /api/subscriptions/plans - administrators also see retired plans
pub async fn list_plans(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    let plans = subscription_repo::find_plans(&state.pool, current_user.is_admin()).await?;
    Ok(Json(plans))
}

/// POST /api/subscriptions/plans
pub async fn create_plan(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<SubscriptionPlanCreate>,
) -> AppResult<(StatusCode, Json<SubscriptionPlan>)> {
    validate_plan(&payload)?;
    let plan = subscription_repo::create_plan(&state.pool, &payload)
        .await
        .map_err(|e| e.or_duplicate(ErrorCode::PlanNameExists))?;
    tracing::info!(plan_id = plan.id, admin_id = current_user.id, "Subscription plan created");
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/subscriptions/status - the caller's current subscription
pub async fn status(
    State(state): State<ServerState>,
    provider: OwnedProvider,
) -> AppResult<Json<SubscriptionStatusView>> {
    let sub = &provider.subscription;
    let plan = match sub.subscription_plan_id {
        Some(plan_id) => subscription_repo::find_plan(&state.pool, plan_id).await?,
        None => None,
    };
    Ok(Json(SubscriptionStatusView {
        is_active: sub.is_active_at(now_millis()),
        plan,
        start: sub.subscription_start,
        end: sub.subscription_end,
        payment_status: sub.subscription_status,
    }))
}

/// POST /api/subscriptions/subscribe - pay for a plan, crediting the referrer
pub async fn subscribe(
    State(state): State<ServerState>,
    provider: OwnedProvider,
    Json(req): Json<SubscribeRequest>,
) -> AppResult<Json<SubscriptionStatusView>> {
    let plan = subscription_repo::find_plan(&state.pool, req.plan_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::PlanNotFound, format!("Plan {} not found", req.plan_id))
        })?;

    let (start, end) =
        subscription_repo::subscribe(&state.pool, provider.kind, provider.id, &plan, now_millis())
            .await
            .map_err(|e| e.or_not_found(ErrorCode::ProviderProfileRequired))?;
    tracing::info!(
        provider_id = provider.id,
        plan_id = plan.id,
        end,
        "Subscription activated"
    );

    Ok(Json(SubscriptionStatusView {
        is_active: true,
        plan: Some(plan),
        start: Some(start),
        end: Some(end),
        payment_status: SubscriptionStatus::Paid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(price: f64, days: i64) -> SubscriptionPlanCreate {
        SubscriptionPlanCreate {
            name: "Gold".into(),
            price,
            duration_in_days: days,
            features: vec!["Featured listing".into()],
        }
    }

    #[test]
    fn test_plan_validation() {
        assert!(validate_plan(&plan(0.0, 30)).is_ok());
        assert!(validate_plan(&plan(-1.0, 30)).is_err());
        assert!(validate_plan(&plan(999.0, 0)).is_err());
        let mut p = plan(999.0, 30);
        p.features.push(" ".into());
        assert!(validate_plan(&p).is_err());
    }
}
