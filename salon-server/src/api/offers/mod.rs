//! Offer API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/offers | GET | authenticated |
//! | /api/offers | POST | admin |
//! | /api/offers/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/offers", routes())
}

fn routes() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handler::list))
        .merge(admin_routes)
}
