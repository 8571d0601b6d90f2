//! Salon API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/salons/nearby | GET | public |
//! | /api/salons/featured | GET | public |
//! | /api/salons/home | GET | public |
//! | /api/salons/{id} | GET | public |
//! | /api/salons/mine | GET | salon owner |
//! | /api/salons/mine/home-service | PATCH | salon owner |
//! | /api/salons/{id}/location | PUT | owner of the salon or admin |
//! | /api/salons | GET | admin |
//! | /api/salons/unverified | GET | admin |
//! | /api/salons/{id}/verify | PATCH | admin |

pub(crate) mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, put},
};
use shared::models::UserRole;

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/salons", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/nearby", get(handler::nearby))
        .route("/featured", get(handler::featured))
        .route("/home", get(handler::home))
        .route("/{id}", get(handler::get_by_id));

    let owner_routes = Router::new()
        .route("/mine", get(handler::mine))
        .route("/mine/home-service", patch(handler::toggle_home_service))
        .layer(middleware::from_fn(require_role(&[UserRole::SalonOwner])));

    // Ownership is checked in the handler
    let location_routes = Router::new().route("/{id}/location", put(handler::update_location));

    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route("/unverified", get(handler::unverified))
        .route("/{id}/verify", patch(handler::verify))
        .layer(middleware::from_fn(require_admin));

    public_routes
        .merge(owner_routes)
        .merge(location_routes)
        .merge(admin_routes)
}
