//! Salesman API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Datelike, Utc};
use shared::models::{
    SalesRegistered, SalesRegistration, SalesStatus, Salesman, SalesmanWithUser, Salon, UserRole,
};
use sqlx::SqliteConnection;

use crate::api::sales_executives::handler::{
    REFERRAL_ATTEMPTS, create_sales_user, current_executive, ensure_contact_free,
    validate_registration,
};
use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, salon as salon_repo, sales as sales_repo};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

async fn unique_salesman_referral(conn: &mut SqliteConnection) -> AppResult<String> {
    let year = Utc::now().year();
    for _ in 0..REFERRAL_ATTEMPTS {
        let candidate = password::generate_referral_id("SP", year);
        if !sales_repo::salesman_referral_taken(&mut *conn, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::new(ErrorCode::ReferralIdExhausted))
}

/// POST /api/salesmen - onboard a salesman into the caller's team
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(req): Json<SalesRegistration>,
) -> AppResult<(StatusCode, Json<SalesRegistered<Salesman>>)> {
    let rate = req.commission_rate.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "commission_rate is required")
            .with_detail("field", "commission_rate")
    })?;
    let contact = validate_registration(&req)?;

    let executive = current_executive(&state, &current_user)
        .await
        .map_err(|e| {
            if e.code == ErrorCode::SalesExecutiveNotFound {
                AppError::with_message(ErrorCode::SalesExecutiveBlocked, e.message)
            } else {
                e
            }
        })?;
    if executive.status == SalesStatus::Blocked {
        security_log!("WARN", "blocked_executive_onboarding", user_id = current_user.id);
        return Err(AppError::with_message(
            ErrorCode::SalesExecutiveBlocked,
            "Sales executive account is blocked",
        ));
    }

    ensure_contact_free(&state.pool, &contact).await?;

    let mut tx = state.pool.begin().await.map_err(RepoError::from)?;
    let (user, password) = create_sales_user(&mut tx, &contact, UserRole::Salesman).await?;
    let referral_id = unique_salesman_referral(&mut tx).await?;
    let profile = sales_repo::create_salesman(
        &mut tx,
        user.id,
        executive.id,
        &contact.city,
        &referral_id,
        rate,
    )
    .await?;
    tx.commit().await.map_err(RepoError::from)?;

    security_log!(
        "INFO",
        "salesman_created",
        user_id = user.id,
        executive_id = executive.id
    );
    Ok((
        StatusCode::CREATED,
        Json(SalesRegistered {
            user,
            profile,
            password,
        }),
    ))
}

/// GET /api/salesmen - executives see their own team, admins everyone
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SalesmanWithUser>>> {
    let team = if current_user.is_admin() {
        None
    } else {
        Some(current_executive(&state, &current_user).await?.id)
    };
    Ok(Json(sales_repo::list_salesmen(&state.pool, team).await?))
}

/// GET /api/salesmen/me/salons - salons onboarded with the caller's referral id
pub async fn my_salons(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Salon>>> {
    let salesman = sales_repo::find_salesman_by_user(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::SalesmanNotFound,
                "No salesman profile is linked to this account",
            )
        })?;
    Ok(Json(salon_repo::find_referred_by(&state.pool, salesman.id).await?))
}
