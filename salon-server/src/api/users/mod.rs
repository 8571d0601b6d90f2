//! User moderation API (admin)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/verify", patch(handler::verify))
        .route("/{id}/block", patch(handler::block))
        .route("/{id}/activate", patch(handler::activate))
        .route("/{id}/reset-password", post(handler::reset_password))
        .layer(middleware::from_fn(require_admin))
}
