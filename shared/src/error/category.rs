//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Account errors
/// - 4xxx: Booking errors
/// - 5xxx: Provider errors
/// - 6xxx: Catalog errors
/// - 7xxx: Subscription errors
/// - 8xxx: Sales / location errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Account errors (3xxx)
    Account,
    /// Booking errors (4xxx)
    Booking,
    /// Provider errors (5xxx)
    Provider,
    /// Catalog errors (6xxx)
    Catalog,
    /// Subscription errors (7xxx)
    Subscription,
    /// Sales hierarchy and location errors (8xxx)
    Sales,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Account,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Provider,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Subscription,
            8000..9000 => Self::Sales,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Account => "account",
            Self::Booking => "booking",
            Self::Provider => "provider",
            Self::Catalog => "catalog",
            Self::Subscription => "subscription",
            Self::Sales => "sales",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
