//! Location API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/locations/states | GET | public |
//! | /api/locations/states | POST | admin |
//! | /api/locations/states/{id}/cities | GET | public |
//! | /api/locations/cities | GET | public |
//! | /api/locations/cities | POST | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/locations", routes())
}

fn routes() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/states", post(handler::create_state))
        .route("/cities", post(handler::create_city))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/states", get(handler::list_states))
        .route("/states/{id}/cities", get(handler::cities_of_state))
        .route("/cities", get(handler::list_cities))
        .merge(admin_routes)
}
