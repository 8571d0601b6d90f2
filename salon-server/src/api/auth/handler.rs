//! Authentication Handlers
//!
//! Signup with role profiles, login, and the OTP password reset flow

use std::time::Duration;

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ProfessionalCreate,
    ResetPasswordRequest, RoleDetails, SalonCreate, SignupRequest, User, UserCreate, UserRole,
    UserWithRole, VerifyOtpRequest,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{
    RepoError, category as category_repo, professional as professional_repo,
    sales as sales_repo, salon as salon_repo, user as user_repo,
};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, normalize_email,
    validate_email, validate_government_id, validate_location, validate_optional_text,
    validate_password, validate_phone, validate_range, validate_required_text, validate_schedule,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay on failed logins against timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/signup - register an account and its role profile
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserWithRole>)> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    let phone = req.phone.trim().to_string();
    validate_phone(&phone)?;
    validate_password(&req.password)?;
    let email = normalize_email(req.email.clone());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    validate_optional_text(&req.whatsapp, "whatsapp", MAX_SHORT_TEXT_LEN)?;

    if !req.role.is_self_assignable() {
        security_log!("WARN", "signup_role_denied", role = req.role.as_str());
        return Err(AppError::with_message(
            ErrorCode::RoleNotSelfAssignable,
            format!("Role {} cannot be chosen at signup", req.role),
        ));
    }
    match req.role {
        UserRole::SalonOwner => {
            let salon = req.salon.as_ref().ok_or_else(|| profile_required("salon"))?;
            validate_salon_payload(salon)?;
        }
        UserRole::IndependentPro => {
            let pro = req
                .professional
                .as_ref()
                .ok_or_else(|| profile_required("professional"))?;
            validate_professional_payload(&state.pool, pro).await?;
        }
        _ => {}
    }

    if user_repo::find_by_phone(&state.pool, &phone).await?.is_some() {
        return Err(AppError::new(ErrorCode::PhoneExists));
    }
    if let Some(email) = &email
        && user_repo::find_by_email(&state.pool, email).await?.is_some()
    {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let password_hash = password::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let mut tx = state.pool.begin().await.map_err(RepoError::from)?;

    let referred_by = match req.referral_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            let salesman = sales_repo::find_salesman_by_referral(&mut *tx, code)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::ReferralCodeInvalid,
                        format!("Referral code {code} is not valid"),
                    )
                })?;
            Some(salesman.id)
        }
        _ => None,
    };

    let user = user_repo::create(
        &mut *tx,
        UserCreate {
            name: req.name.trim().to_string(),
            email,
            phone,
            whatsapp: req.whatsapp.clone(),
            password_hash,
            role: req.role,
        },
    )
    .await
    .map_err(|e| e.or_duplicate(ErrorCode::PhoneExists))?;

    let role_details = match (req.role, &req.salon, &req.professional) {
        (UserRole::SalonOwner, Some(salon), _) => Some(RoleDetails::Salon(
            salon_repo::create(&mut *tx, user.id, salon, referred_by, None).await?,
        )),
        (UserRole::IndependentPro, _, Some(pro)) => Some(RoleDetails::Professional(
            professional_repo::create(&mut *tx, user.id, pro, referred_by).await?,
        )),
        _ => None,
    };

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        user_id = user.id,
        role = user.role.as_str(),
        referred = referred_by.is_some(),
        "Account registered"
    );

    Ok((StatusCode::CREATED, Json(UserWithRole { user, role_details })))
}

fn profile_required(field: &str) -> AppError {
    AppError::with_message(
        ErrorCode::ProviderProfileRequired,
        format!("{field} details are required for this role"),
    )
    .with_detail("field", field)
}

fn validate_salon_payload(salon: &SalonCreate) -> AppResult<()> {
    validate_required_text(&salon.shop_name, "salon.shop_name", MAX_NAME_LEN)?;
    validate_optional_text(&salon.about, "salon.about", MAX_NOTE_LEN)?;
    validate_optional_text(&salon.contact_number, "salon.contact_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&salon.whatsapp_number, "salon.whatsapp_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&salon.registration_number, "salon.registration_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&salon.logo_url, "salon.logo_url", MAX_URL_LEN)?;
    validate_optional_text(&salon.cover_image_url, "salon.cover_image_url", MAX_URL_LEN)?;
    if let Some(staff) = salon.number_of_staff {
        validate_range(staff, 0, 10_000, "salon.number_of_staff")?;
    }
    for partner in &salon.partners {
        validate_required_text(&partner.name, "salon.partners.name", MAX_NAME_LEN)?;
    }
    validate_schedule(&salon.opening_hours, "salon.opening_hours")?;
    validate_location(&salon.location)?;
    validate_government_id(&salon.government_id)
}

async fn validate_professional_payload(pool: &SqlitePool, pro: &ProfessionalCreate) -> AppResult<()> {
    validate_range(pro.experience_years, 0, 80, "professional.experience_years")?;
    if pro.specializations.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "professional.specializations must not be empty",
        )
        .with_detail("field", "professional.specializations"));
    }
    for category_id in &pro.specializations {
        if category_repo::find_by_id(pool, *category_id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("Category {category_id} not found"),
            ));
        }
    }
    if let Some(radius) = pro.radius_km
        && (!radius.is_finite() || radius <= 0.0)
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "professional.radius_km must be positive",
        ));
    }
    validate_optional_text(&pro.profile_photo, "professional.profile_photo", MAX_URL_LEN)?;
    validate_schedule(&pro.availability, "professional.availability")?;
    validate_location(&pro.location)?;
    validate_government_id(&pro.government_id)
}

/// POST /api/auth/login - exchange credentials for a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (phone, email) = identifier(&req.phone, &req.email)?;
    let found = user_repo::find_by_identifier(&state.pool, phone.as_deref(), email.as_deref()).await?;

    // Same answer whether the account is unknown or the password is wrong
    let user = match found {
        Some(user) if password::verify_password(&req.password, &user.password_hash) => user,
        _ => {
            tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;
            security_log!(
                "WARN",
                "login_failed",
                identifier = phone.or(email).unwrap_or_default()
            );
            return Err(AppError::invalid_credentials());
        }
    };

    if user.is_blocked() {
        security_log!("WARN", "login_blocked", user_id = user.id);
        return Err(AppError::new(ErrorCode::AccountBlocked));
    }

    let role_details = role_details(&state.pool, &user).await?;
    let token = state
        .get_jwt_service()
        .generate_token(
            user.id,
            &user.name,
            user.role,
            role_details.as_ref().map(RoleDetails::id),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");

    Ok(Json(LoginResponse {
        token,
        user,
        role_details,
    }))
}

/// GET /api/auth/me - current account with its role profile
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserWithRole>> {
    let user = user_repo::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    let role_details = role_details(&state.pool, &user).await?;
    Ok(Json(UserWithRole { user, role_details }))
}

/// POST /api/auth/forgot-password - issue a reset OTP
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_for_reset(&state.pool, &req.phone, &req.email).await?;

    let otp = password::generate_otp();
    let expires_at = now_millis() + state.config.otp_ttl_seconds * 1000;
    user_repo::set_reset_otp(&state.pool, user.id, &password::hash_otp(&otp), expires_at).await?;

    // No SMS or mail transport: the code is only delivered through the log
    security_log!("INFO", "password_reset_otp", user_id = user.id, otp = otp.as_str());

    Ok(Json(MessageResponse::new(
        "A verification code has been sent",
    )))
}

/// POST /api/auth/verify-otp - check a reset OTP without consuming it
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_for_reset(&state.pool, &req.phone, &req.email).await?;
    check_otp(&user, &req.otp, now_millis())?;
    Ok(Json(MessageResponse::new("Verification code is valid")))
}

/// POST /api/auth/reset-password - set a new password with a valid OTP
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password(&req.new_password)?;
    let user = find_for_reset(&state.pool, &req.phone, &req.email).await?;
    check_otp(&user, &req.otp, now_millis())?;

    let hash = password::hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    user_repo::set_password(&state.pool, user.id, &hash).await?;

    security_log!("INFO", "password_reset", user_id = user.id);
    Ok(Json(MessageResponse::new("Password has been reset")))
}

/// Trimmed phone or normalized email; at least one is required
fn identifier(
    phone: &Option<String>,
    email: &Option<String>,
) -> AppResult<(Option<String>, Option<String>)> {
    let phone = phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let email = normalize_email(email.clone());
    if phone.is_none() && email.is_none() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Phone or email is required",
        ));
    }
    Ok((phone, email))
}

async fn find_for_reset(
    pool: &SqlitePool,
    phone: &Option<String>,
    email: &Option<String>,
) -> AppResult<User> {
    let (phone, email) = identifier(phone, email)?;
    user_repo::find_by_identifier(pool, phone.as_deref(), email.as_deref())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
}

/// Compare against the stored OTP hash and expiry
fn check_otp(user: &User, otp: &str, now: i64) -> AppResult<()> {
    let matches = user
        .reset_otp_hash
        .as_deref()
        .is_some_and(|stored| stored == password::hash_otp(otp));
    if !matches {
        security_log!("WARN", "otp_invalid", user_id = user.id);
        return Err(AppError::new(ErrorCode::OtpInvalid));
    }
    if user.reset_otp_expires_at.is_none_or(|expires| expires <= now) {
        return Err(AppError::new(ErrorCode::OtpExpired));
    }
    Ok(())
}

/// Role profile linked to an account
pub(crate) async fn role_details(pool: &SqlitePool, user: &User) -> AppResult<Option<RoleDetails>> {
    let details = match user.role {
        UserRole::SalonOwner => salon_repo::find_by_owner(pool, user.id)
            .await?
            .map(RoleDetails::Salon),
        UserRole::IndependentPro => professional_repo::find_by_user(pool, user.id)
            .await?
            .map(RoleDetails::Professional),
        UserRole::SalesExecutive => sales_repo::find_executive_by_user(pool, user.id)
            .await?
            .map(RoleDetails::SalesExecutive),
        UserRole::Salesman => sales_repo::find_salesman_by_user(pool, user.id)
            .await?
            .map(RoleDetails::Salesman),
        UserRole::Customer | UserRole::Admin | UserRole::SuperAdmin => None,
    };
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AccountStatus;

    fn user_with_otp(otp: Option<&str>, expires_at: Option<i64>) -> User {
        User {
            id: 1,
            name: "Asha".into(),
            email: None,
            phone: "9000000001".into(),
            whatsapp: None,
            password_hash: String::new(),
            role: UserRole::Customer,
            is_verified: false,
            status: AccountStatus::Active,
            reset_otp_hash: otp.map(password::hash_otp),
            reset_otp_expires_at: expires_at,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_otp_checks() {
        let user = user_with_otp(Some("0427"), Some(2_000));
        assert!(check_otp(&user, "0427", 1_000).is_ok());
        assert!(check_otp(&user, " 0427 ", 1_000).is_ok());
        assert_eq!(check_otp(&user, "1111", 1_000).unwrap_err().code, ErrorCode::OtpInvalid);
        assert_eq!(check_otp(&user, "0427", 2_000).unwrap_err().code, ErrorCode::OtpExpired);

        let none = user_with_otp(None, None);
        assert_eq!(check_otp(&none, "0427", 0).unwrap_err().code, ErrorCode::OtpInvalid);
    }

    #[test]
    fn test_identifier_requires_one_field() {
        assert!(identifier(&None, &Some("  ".into())).is_err());
        let (phone, email) = identifier(&Some(" 9000000001 ".into()), &None).unwrap();
        assert_eq!(phone.as_deref(), Some("9000000001"));
        assert!(email.is_none());
    }
}
