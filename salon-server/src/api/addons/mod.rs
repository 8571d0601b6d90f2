//! Add-on API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/addons | GET | provider |
//! | /api/addons | POST | provider, subscribed |
//! | /api/addons/{id} | PUT, DELETE | provider, subscribed |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::models::UserRole;

use crate::auth::{require_active_subscription, require_role};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/addons", routes(state))
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
        .layer(middleware::from_fn(require_role(&[
            UserRole::SalonOwner,
            UserRole::IndependentPro,
        ])))
}
