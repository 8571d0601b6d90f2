//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - signup, login, password reset
//! - [`users`] - admin moderation of accounts
//! - [`salons`] - discovery, owner and admin salon routes
//! - [`professionals`] - independent professional discovery
//! - [`service_items`], [`addons`], [`specialists`] - provider catalog
//! - [`bookings`] - cart checkout and booking lifecycle
//! - [`categories`], [`offers`] - marketplace catalog
//! - [`subscriptions`] - plans and provider subscriptions
//! - [`sales_executives`], [`salesmen`] - sales hierarchy
//! - [`locations`] - state / city lookup
//! - [`reviews`] - salon reviews

pub mod addons;
pub mod auth;
pub mod bookings;
pub mod categories;
pub mod health;
pub mod locations;
pub mod offers;
pub mod professionals;
pub mod reviews;
pub mod sales_executives;
pub mod salesmen;
pub mod salons;
pub mod service_items;
pub mod specialists;
pub mod subscriptions;
pub mod users;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Every API router merged, without global layers
///
/// `state` is only captured by the routes that gate on it.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(salons::router())
        .merge(professionals::router())
        .merge(service_items::router(state))
        .merge(addons::router(state))
        .merge(specialists::router(state))
        .merge(bookings::router())
        .merge(categories::router())
        .merge(offers::router())
        .merge(subscriptions::router())
        .merge(sales_executives::router())
        .merge(salesmen::router())
        .merge(locations::router())
        .merge(reviews::router())
}
