//! Salon Server - salon marketplace REST backend
//!
//! # Architecture
//!
//! - **Database** (`db`): SQLite through sqlx, one free-function repository per table
//! - **Auth** (`auth`): JWT + Argon2, role-gated middleware
//! - **Booking** (`booking`): slot math, pricing and transactional cart checkout
//! - **Geo** (`geo`): Haversine distance and bounding boxes for proximity search
//! - **HTTP API** (`api`): RESTful endpoints under `/api`
//!
//! # Layout
//!
//! ```text
//! salon-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # JWT, passwords, middleware
//! ├── db/            # pool + repositories
//! ├── booking/       # slot, pricing, cart
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod geo;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialise logging from the environment
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, Some(log_json), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____       __
  / ___/____ _/ /___  ____
  \__ \/ __ `/ / __ \/ __ \
 ___/ / /_/ / / /_/ / / / /
/____/\__,_/_/\____/_/ /_/
    "#
    );
}
