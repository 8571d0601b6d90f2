//! Authentication middleware
//!
//! Axum middleware for JWT authentication, account status and role gates.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;
use shared::models::UserRole;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Routes reachable without a token
///
/// `{id}` segments only match numeric ids so that `/api/salons/mine`
/// stays protected.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let is_id = |s: &str| s.parse::<i64>().is_ok();

    if method == Method::POST {
        return matches!(
            segments.as_slice(),
            ["api", "auth", "signup" | "login" | "forgot-password" | "verify-otp" | "reset-password"]
        );
    }
    if method != Method::GET {
        return false;
    }

    match segments.as_slice() {
        ["api", "salons", "nearby" | "featured" | "home"] => true,
        ["api", "salons", id] => is_id(id),
        ["api", "professionals", "nearby" | "home"] => true,
        ["api", "professionals", id] => is_id(id),
        ["api", "categories"] => true,
        ["api", "locations", "states" | "cities"] => true,
        ["api", "locations", "states", id, "cities"] => is_id(id),
        ["api", "reviews", "salon", id] => is_id(id),
        _ => false,
    }
}

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// inserts [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - routes matched by [`is_public_route`]
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();

    // Non-API routes fall through to the 404 fallback
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            return match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Account status middleware
///
/// Runs after [`require_auth`]. Re-reads the account so that blocking takes
/// effect on tokens already issued.
///
/// | Failure | Status |
/// |---------|--------|
/// | account deleted | 401 NotAuthenticated |
/// | account blocked | 403 AccountBlocked |
pub async fn require_active_account(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = req.extensions().get::<CurrentUser>().map(|u| u.id) else {
        return Ok(next.run(req).await);
    };

    let account = user_repo::find_by_id(&state.pool, user_id).await?;
    match account {
        None => {
            security_log!("WARN", "auth_unknown_user", user_id = user_id);
            Err(AppError::unauthorized())
        }
        Some(account) if account.is_blocked() => {
            security_log!("WARN", "account_blocked", user_id = user_id);
            Err(AppError::new(ErrorCode::AccountBlocked))
        }
        Some(_) => Ok(next.run(req).await),
    }
}

/// Role gate - the caller's role must be one of `roles`
///
/// ```ignore
/// Router::new()
///     .route("/mine", get(handler::mine))
///     .layer(middleware::from_fn(require_role(&[UserRole::SalonOwner])));
/// ```
///
/// # Errors
///
/// Wrong role returns 403 RoleRequired
pub fn require_role(
    roles: &'static [UserRole],
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_role(roles) {
                let required = roles
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id,
                    user_role = user.role.as_str(),
                    required_roles = required.as_str()
                );
                return Err(AppError::with_message(
                    ErrorCode::RoleRequired,
                    format!("This action requires role: {required}"),
                ));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Admin gate - `admin` or `super_admin`
///
/// # Errors
///
/// Non-admins get 403 AdminRequired
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            user_role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

/// Super admin gate
///
/// # Errors
///
/// Everyone else gets 403 SuperAdminRequired
pub async fn require_super_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_super_admin() {
        security_log!(
            "WARN",
            "super_admin_required",
            user_id = user.id,
            user_role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::SuperAdminRequired));
    }

    Ok(next.run(req).await)
}

/// Subscription gate for provider catalog mutations
///
/// Resolves the caller's salon or professional profile and requires a paid
/// subscription whose end lies in the future. The resolved
/// [`crate::auth::OwnedProvider`] is left in the request extensions.
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | no provider profile | 400 ProviderProfileRequired |
/// | subscription not active | 403 SubscriptionInactive |
pub async fn require_active_subscription(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(AppError::unauthorized())?;

    let provider = crate::auth::OwnedProvider::resolve(&state.pool, &user).await?;
    if !provider
        .subscription
        .is_active_at(shared::util::now_millis())
    {
        security_log!(
            "WARN",
            "subscription_inactive",
            user_id = user.id,
            provider_id = provider.id
        );
        return Err(AppError::new(ErrorCode::SubscriptionInactive));
    }

    req.extensions_mut().insert(provider);
    Ok(next.run(req).await)
}

/// Extension trait to read [`CurrentUser`] off a raw request
pub trait CurrentUserExt {
    /// # Errors
    ///
    /// 401 when the request was not authenticated
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or(AppError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_auth_routes() {
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(is_public_route(&Method::POST, "/api/auth/signup"));
        assert!(!is_public_route(&Method::GET, "/api/auth/me"));
    }

    #[test]
    fn test_public_salon_routes() {
        assert!(is_public_route(&Method::GET, "/api/salons/nearby"));
        assert!(is_public_route(&Method::GET, "/api/salons/123"));
        assert!(!is_public_route(&Method::GET, "/api/salons/mine"));
        assert!(!is_public_route(&Method::GET, "/api/salons/unverified"));
        assert!(!is_public_route(&Method::GET, "/api/salons"));
        assert!(!is_public_route(&Method::PUT, "/api/salons/123/location"));
    }

    #[test]
    fn test_public_lookup_routes() {
        assert!(is_public_route(&Method::GET, "/api/categories"));
        assert!(!is_public_route(&Method::GET, "/api/categories/all"));
        assert!(!is_public_route(&Method::POST, "/api/categories"));
        assert!(is_public_route(&Method::GET, "/api/locations/states"));
        assert!(is_public_route(&Method::GET, "/api/locations/states/9/cities"));
        assert!(!is_public_route(&Method::POST, "/api/locations/states"));
        assert!(is_public_route(&Method::GET, "/api/reviews/salon/5"));
        assert!(!is_public_route(&Method::GET, "/api/offers"));
    }
}
