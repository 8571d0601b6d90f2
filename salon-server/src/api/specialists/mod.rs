//! Specialist API (salon owner)
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/specialists | GET | salon owner |
//! | /api/specialists | POST | salon owner, subscribed |
//! | /api/specialists/{id} | PUT, DELETE | salon owner, subscribed |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::models::UserRole;

use crate::auth::{require_active_subscription, require_role};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/specialists", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_active_subscription,
        ));

    Router::new()
        .route("/", get(handler::list))
        .merge(write_routes)
        .layer(middleware::from_fn(require_role(&[UserRole::SalonOwner])))
}
