//! Service Category API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/categories | GET | public |
//! | /api/categories/all | GET | admin |
//! | /api/categories | POST | admin |
//! | /api/categories/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/all", get(handler::list_all))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handler::list))
        .merge(admin_routes)
}
