//! Review API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/reviews | POST | customer |
//! | /api/reviews/salon/{salon_id} | GET | public |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_role(&[UserRole::Customer])));

    Router::new()
        .route("/salon/{salon_id}", get(handler::for_salon))
        .merge(customer_routes)
}
