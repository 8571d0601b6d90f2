//! Authentication and authorization
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - caller context
//! - [`OwnedProvider`] - caller's salon or professional profile
//! - [`require_auth`] and the role / account / subscription gates

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod provider;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{
    CurrentUserExt, is_public_route, require_active_account, require_active_subscription,
    require_admin, require_auth, require_role, require_super_admin,
};
pub use provider::OwnedProvider;
