//! Sales Executive API Handlers
//!
//! Sales accounts are created by their superior, never through signup. The
//! generated password is returned once in the creation response.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use shared::models::{
    SalesExecutive, SalesExecutiveWithUser, SalesRegistered, SalesRegistration, SalesmanWithUser,
    User, UserCreate, UserRole,
};
use sqlx::{SqliteConnection, SqlitePool};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, sales as sales_repo, user as user_repo};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, normalize_email, validate_email, validate_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Referral id draws before giving up
pub(crate) const REFERRAL_ATTEMPTS: usize = 5;

/// Executives earn nothing unless a rate is given
const DEFAULT_EXECUTIVE_RATE: f64 = 0.0;

/// Validated contact details of a new sales account
pub(crate) struct SalesContactInput {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
}

pub(crate) fn validate_registration(reg: &SalesRegistration) -> AppResult<SalesContactInput> {
    validate_required_text(&reg.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&reg.city, "city", MAX_NAME_LEN)?;
    let phone = reg.phone.trim().to_string();
    validate_phone(&phone)?;
    let email = normalize_email(reg.email.clone());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    if let Some(rate) = reg.commission_rate {
        validate_rate(rate)?;
    }
    Ok(SalesContactInput {
        name: reg.name.trim().to_string(),
        phone,
        email,
        city: reg.city.trim().to_string(),
    })
}

pub(crate) fn validate_rate(rate: f64) -> AppResult<()> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "commission_rate must be between 0 and 1",
        )
        .with_detail("field", "commission_rate"));
    }
    Ok(())
}

/// Phone and email must not belong to another account
pub(crate) async fn ensure_contact_free(pool: &SqlitePool, contact: &SalesContactInput) -> AppResult<()> {
    if user_repo::find_by_phone(pool, &contact.phone).await?.is_some() {
        return Err(AppError::new(ErrorCode::PhoneExists));
    }
    if let Some(email) = &contact.email
        && user_repo::find_by_email(pool, email).await?.is_some()
    {
        return Err(AppError::new(ErrorCode::EmailExists));
    }
    Ok(())
}

/// Create the login for a sales account, returning it with its plain password
pub(crate) async fn create_sales_user(
    conn: &mut SqliteConnection,
    contact: &SalesContactInput,
    role: UserRole,
) -> AppResult<(User, String)> {
    let plain = password::generate_password();
    let password_hash = password::hash_password(&plain)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    let user = user_repo::create(
        &mut *conn,
        UserCreate {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            whatsapp: None,
            password_hash,
            role,
        },
    )
    .await
    .map_err(|e| e.or_duplicate(ErrorCode::PhoneExists))?;
    Ok((user, plain))
}

async fn unique_executive_referral(conn: &mut SqliteConnection) -> AppResult<String> {
    let year = Utc::now().year();
    for _ in 0..REFERRAL_ATTEMPTS {
        let candidate = password::generate_referral_id("SE", year);
        if !sales_repo::executive_referral_taken(&mut *conn, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::new(ErrorCode::ReferralIdExhausted))
}

/// POST /api/sales-executives
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(req): Json<SalesRegistration>,
) -> AppResult<(StatusCode, Json<SalesRegistered<SalesExecutive>>)> {
    let contact = validate_registration(&req)?;
    ensure_contact_free(&state.pool, &contact).await?;

    let mut tx = state.pool.begin().await.map_err(RepoError::from)?;
    let (user, password) = create_sales_user(&mut tx, &contact, UserRole::SalesExecutive).await?;
    let referral_id = unique_executive_referral(&mut tx).await?;
    let profile = sales_repo::create_executive(
        &mut tx,
        user.id,
        &contact.city,
        &referral_id,
        req.commission_rate.unwrap_or(DEFAULT_EXECUTIVE_RATE),
    )
    .await?;
    tx.commit().await.map_err(RepoError::from)?;

    security_log!(
        "INFO",
        "sales_executive_created",
        user_id = user.id,
        created_by = current_user.id
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

/// GET /api/sales-executives - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SalesExecutiveWithUser>>> {
    Ok(Json(sales_repo::list_executives(&state.pool).await?))
}

/// GET /api/sales-executives/city/{city}
pub async fn list_by_city(
    State(state): State<ServerState>,
    Path(city): Path<String>,
) -> AppResult<Json<Vec<SalesExecutiveWithUser>>> {
    Ok(Json(
        sales_repo::list_executives_by_city(&state.pool, city.trim()).await?,
    ))
}

/// GET /api/sales-executives/me/team - salesmen under the caller
pub async fn my_team(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SalesmanWithUser>>> {
    let executive = current_executive(&state, &current_user).await?;
    Ok(Json(
        sales_repo::list_salesmen(&state.pool, Some(executive.id)).await?,
    ))
}

/// The caller's executive profile, by token `role_id` first
pub(crate) async fn current_executive(
    state: &ServerState,
    user: &CurrentUser,
) -> AppResult<SalesExecutive> {
    if let Some(id) = user.role_id
        && let Some(exec) = sales_repo::find_executive(&state.pool, id).await?
        && exec.user_id == user.id
    {
        return Ok(exec);
    }
    sales_repo::find_executive_by_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::SalesExecutiveNotFound,
                "No sales executive profile is linked to this account",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> SalesRegistration {
        SalesRegistration {
            name: " Ravi Kumar ".into(),
            email: Some(" Ravi@Example.com ".into()),
            phone: "9876543210".into(),
            city: "Pune".into(),
            commission_rate: Some(0.02),
        }
    }

    #[test]
    fn test_registration_normalized() {
        let contact = validate_registration(&registration()).unwrap();
        assert_eq!(contact.name, "Ravi Kumar");
        assert_eq!(contact.email.as_deref(), Some("ravi@example.com"));
    }

    #[test]
    fn test_registration_rejections() {
        let mut r = registration();
        r.commission_rate = Some(1.5);
        assert_eq!(
            validate_registration(&r).err().map(|e| e.code),
            Some(ErrorCode::ValueOutOfRange)
        );

        let mut r = registration();
        r.phone = "12ab".into();
        assert!(validate_registration(&r).is_err());

        let mut r = registration();
        r.city = "".into();
        assert!(validate_registration(&r).is_err());
    }
}
