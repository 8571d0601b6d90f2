//! Booking API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/bookings | POST | customer |
//! | /api/bookings/mine | GET | customer |
//! | /api/bookings/salon | GET | salon owner |
//! | /api/bookings/{id}/status | PATCH | provider owner or admin |
//! | /api/bookings/{id}/cancel | PATCH | booking customer or provider owner |
//! | /api/bookings/{id}/rating | POST | booking customer |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use shared::models::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/mine", get(handler::mine))
        .route("/{id}/rating", post(handler::rate))
        .layer(middleware::from_fn(require_role(&[UserRole::Customer])));

    let owner_routes = Router::new()
        .route("/salon", get(handler::for_salon))
        .layer(middleware::from_fn(require_role(&[UserRole::SalonOwner])));

    // Per-booking access is decided in the handlers
    let lifecycle_routes = Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/cancel", patch(handler::cancel));

    customer_routes.merge(owner_routes).merge(lifecycle_routes)
}
