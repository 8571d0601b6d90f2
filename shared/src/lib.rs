//! Shared types for the salon marketplace
//!
//! Error taxonomy, domain models and paging types used by the server and
//! by API clients.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
