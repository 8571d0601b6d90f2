//! Service Item API
//!
//! Catalog of the caller's salon or professional profile. Mutations need an
//! active subscription.
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/service-items | GET | provider |
//! | /api/service-items | POST | provider, subscribed |
//! | /api/service-items/{id} | PUT | provider, subscribed |
//! | /api/service-items/{id} | DELETE | provider, subscribed |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::models::UserRole;

use crate::auth::{require_active_subscription, require_role};
use crate::core::ServerState;

const PROVIDER_ROLES: &[UserRole] = &[UserRole::SalonOwner, UserRole::IndependentPro];

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/service-items", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_active_subscription,
        ));

    read_routes
        .merge(write_routes)
        .layer(middleware::from_fn(require_role(PROVIDER_ROLES)))
}
