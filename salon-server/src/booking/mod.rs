//! Booking engine
//!
//! - [`slot`]: date/time parsing and `[start, end)` slot arithmetic
//! - [`pricing`]: decimal line totals, offer discounts, commissions
//! - [`cart`]: transactional multi-salon cart booking

pub mod cart;
pub mod pricing;
pub mod slot;

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

pub use cart::book_cart;
pub use slot::Slot;

/// Booking rule violations
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    CartEmpty(String),

    #[error("Salon {0} not found")]
    SalonNotFound(i64),

    #[error("Salon {0} is not verified")]
    SalonNotVerified(i64),

    #[error("Salon {0} does not offer home service")]
    HomeServiceUnavailable(i64),

    #[error("Service location is required for home service")]
    ServiceLocationRequired,

    #[error("Invalid service selection")]
    InvalidServiceSelection,

    #[error("Invalid add-on selection")]
    InvalidAddonSelection,

    #[error("Specialist does not belong to this salon")]
    InvalidSpecialist,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Booking date is in the past")]
    DateInPast,

    #[error("Booking would run past midnight")]
    PastMidnight,

    #[error("Cart contains overlapping slots for the same salon")]
    OverlapInCart,

    #[error("Selected time slot is already booked")]
    SlotUnavailable,

    #[error("{0}")]
    OfferNotApplicable(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::CartEmpty(_) => ErrorCode::CartEmpty,
            BookingError::SalonNotFound(_) => ErrorCode::SalonNotFound,
            BookingError::SalonNotVerified(_) => ErrorCode::SalonNotVerified,
            BookingError::HomeServiceUnavailable(_) => ErrorCode::HomeServiceUnavailable,
            BookingError::ServiceLocationRequired => ErrorCode::ServiceLocationRequired,
            BookingError::InvalidServiceSelection => ErrorCode::InvalidServiceSelection,
            BookingError::InvalidAddonSelection => ErrorCode::InvalidAddonSelection,
            BookingError::InvalidSpecialist => ErrorCode::InvalidSpecialist,
            BookingError::InvalidDate(_)
            | BookingError::InvalidTime(_)
            | BookingError::PastMidnight => ErrorCode::InvalidTimeSlot,
            BookingError::DateInPast => ErrorCode::BookingInPast,
            BookingError::OverlapInCart | BookingError::SlotUnavailable => {
                ErrorCode::SlotUnavailable
            }
            BookingError::OfferNotApplicable(_) => ErrorCode::OfferNotApplicable,
            BookingError::Repo(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Repo(repo) => repo.into(),
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (BookingError::SalonNotFound(1), StatusCode::NOT_FOUND),
            (BookingError::SalonNotVerified(1), StatusCode::BAD_REQUEST),
            (BookingError::InvalidServiceSelection, StatusCode::BAD_REQUEST),
            (BookingError::PastMidnight, StatusCode::BAD_REQUEST),
            (BookingError::OverlapInCart, StatusCode::CONFLICT),
            (BookingError::SlotUnavailable, StatusCode::CONFLICT),
            (
                BookingError::Repo(RepoError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_slot_message_is_preserved() {
        let err = AppError::from(BookingError::SlotUnavailable);
        assert_eq!(err.message, "Selected time slot is already booked");
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }
}
