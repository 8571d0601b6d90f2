//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/signup | POST | public |
//! | /api/auth/login | POST | public |
//! | /api/auth/forgot-password | POST | public |
//! | /api/auth/verify-otp | POST | public |
//! | /api/auth/reset-password | POST | public |
//! | /api/auth/me | GET | token |

pub(crate) mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/reset-password", post(handler::reset_password))
        .route("/me", get(handler::me))
}
