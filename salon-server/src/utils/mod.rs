//! Utilities - error re-exports, validation and logging
//!
//! - [`AppError`] - request error type (from shared::error)
//! - [`ApiResponse`] - response envelope (from shared::error)

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
