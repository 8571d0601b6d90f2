//! Sales Executive API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/sales-executives | POST | super admin |
//! | /api/sales-executives | GET | super admin |
//! | /api/sales-executives/city/{city} | GET | admin |
//! | /api/sales-executives/me/team | GET | sales executive |

pub(crate) mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::UserRole;

use crate::auth::{require_admin, require_role, require_super_admin};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales-executives", routes())
}

fn routes() -> Router<ServerState> {
    let super_admin_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .layer(middleware::from_fn(require_super_admin));

    let admin_routes = Router::new()
        .route("/city/{city}", get(handler::list_by_city))
        .layer(middleware::from_fn(require_admin));

    let executive_routes = Router::new()
        .route("/me/team", get(handler::my_team))
        .layer(middleware::from_fn(require_role(&[UserRole::SalesExecutive])));

    super_admin_routes
        .merge(admin_routes)
        .merge(executive_routes)
}
