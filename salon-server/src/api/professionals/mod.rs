//! Independent Professional API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/professionals/home | GET | public |
//! | /api/professionals/nearby | GET | public |
//! | /api/professionals/{id} | GET | public |
//! | /api/professionals/unverified | GET | admin |
//! | /api/professionals/{id}/verify | PATCH | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/professionals", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/home", get(handler::home))
        .route("/nearby", get(handler::nearby))
        .route("/{id}", get(handler::get_by_id));

    let admin_routes = Router::new()
        .route("/unverified", get(handler::unverified))
        .route("/{id}/verify", patch(handler::verify))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(admin_routes)
}
