//! Salesman API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/salesmen | POST | sales executive |
//! | /api/salesmen | GET | sales executive (own team) or admin |
//! | /api/salesmen/me/salons | GET | salesman |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/salesmen", routes())
}

fn routes() -> Router<ServerState> {
    let create_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_role(&[UserRole::SalesExecutive])));

    let list_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_role(&[
            UserRole::SalesExecutive,
            UserRole::Admin,
            UserRole::SuperAdmin,
        ])));

    let salesman_routes = Router::new()
        .route("/me/salons", get(handler::my_salons))
        .layer(middleware::from_fn(require_role(&[UserRole::Salesman])));

    create_routes.merge(list_routes).merge(salesman_routes)
}
