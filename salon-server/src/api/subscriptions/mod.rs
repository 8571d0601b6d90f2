//! Subscription API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/subscriptions/plans | GET | provider or admin |
//! | /api/subscriptions/plans | POST | admin |
//! | /api/subscriptions/status | GET | provider |
//! | /api/subscriptions/subscribe | POST | provider |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::UserRole;

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/subscriptions", routes())
}

fn routes() -> Router<ServerState> {
    let plan_routes = Router::new()
        .route("/plans", get(handler::list_plans))
        .layer(middleware::from_fn(require_role(&[
            UserRole::SalonOwner,
            UserRole::IndependentPro,
            UserRole::Admin,
            UserRole::SuperAdmin,
        ])));

    let admin_routes = Router::new()
        .route("/plans", post(handler::create_plan))
        .layer(middleware::from_fn(require_admin));

    let provider_routes = Router::new()
        .route("/status", get(handler::status))
        .route("/subscribe", post(handler::subscribe))
        .layer(middleware::from_fn(require_role(&[
            UserRole::SalonOwner,
            UserRole::IndependentPro,
        ])));

    plan_routes.merge(admin_routes).merge(provider_routes)
}
