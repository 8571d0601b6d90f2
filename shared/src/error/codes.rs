//! Unified error codes for the salon marketplace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Booking errors
//! - 5xxx: Provider errors (salons, professionals, specialists)
//! - 6xxx: Catalog errors (service items, add-ons, categories, offers)
//! - 7xxx: Subscription errors
//! - 8xxx: Sales hierarchy and location errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// No route matches the request path
    RouteNotFound = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (phone/email and password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Password reset code does not match
    OtpInvalid = 1005,
    /// Password reset code has expired
    OtpExpired = 1006,
    /// Password too short
    PasswordTooShort = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Super admin role required
    SuperAdminRequired = 2004,
    /// Resource belongs to another account
    NotResourceOwner = 2005,
    /// Role cannot be chosen at signup
    RoleNotSelfAssignable = 2006,

    // ==================== 3xxx: Account ====================
    /// User not found
    UserNotFound = 3001,
    /// Phone number already registered
    PhoneExists = 3002,
    /// Email already registered
    EmailExists = 3003,
    /// Account is blocked
    AccountBlocked = 3004,
    /// Admin tried to block their own account
    CannotBlockSelf = 3005,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Requested slot overlaps an existing booking
    SlotUnavailable = 4002,
    /// Service does not belong to the provider or is inactive
    InvalidServiceSelection = 4003,
    /// Add-on does not belong to the provider
    InvalidAddonSelection = 4004,
    /// Specialist does not belong to the salon
    InvalidSpecialist = 4005,
    /// Booking date is in the past
    BookingInPast = 4006,
    /// Date or time could not be parsed, or the slot runs past midnight
    InvalidTimeSlot = 4007,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4008,
    /// Booking can no longer be cancelled
    BookingNotCancellable = 4009,
    /// Booking has already been rated
    BookingAlreadyRated = 4010,
    /// Booking is not completed yet
    BookingNotCompleted = 4011,
    /// Provider does not offer home service
    HomeServiceUnavailable = 4012,
    /// Home service booking without a service location
    ServiceLocationRequired = 4013,
    /// Booking cart is empty
    CartEmpty = 4014,

    // ==================== 5xxx: Provider ====================
    /// Salon not found
    SalonNotFound = 5001,
    /// Salon has not been verified by an admin
    SalonNotVerified = 5002,
    /// Independent professional not found
    ProfessionalNotFound = 5003,
    /// Specialist not found
    SpecialistNotFound = 5004,
    /// Role requires a provider profile payload
    ProviderProfileRequired = 5005,
    /// Latitude/longitude missing or out of range
    InvalidCoordinates = 5006,

    // ==================== 6xxx: Catalog ====================
    /// Service item not found
    ServiceItemNotFound = 6001,
    /// Add-on not found
    AddonNotFound = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists for the gender
    CategoryNameExists = 6102,
    /// Category is referenced by service items
    CategoryInUse = 6103,
    /// Offer not found
    OfferNotFound = 6201,
    /// Offer code already exists
    OfferCodeExists = 6202,
    /// Offer is inactive, expired or below its minimum amount
    OfferNotApplicable = 6203,
    /// Review not accepted
    ReviewInvalid = 6301,

    // ==================== 7xxx: Subscription ====================
    /// Subscription plan not found
    PlanNotFound = 7001,
    /// Subscription plan name already exists
    PlanNameExists = 7002,
    /// No active subscription
    SubscriptionInactive = 7003,

    // ==================== 8xxx: Sales / Location ====================
    /// Sales executive not found
    SalesExecutiveNotFound = 8001,
    /// Salesman not found
    SalesmanNotFound = 8002,
    /// Referral code does not match any salesman
    ReferralCodeInvalid = 8003,
    /// Could not allocate a unique referral id
    ReferralIdExhausted = 8004,
    /// Sales executive is blocked
    SalesExecutiveBlocked = 8005,
    /// State not found
    StateNotFound = 8101,
    /// State name already exists
    StateNameExists = 8102,
    /// City name already exists in the state
    CityNameExists = 8104,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::RouteNotFound => "Route not found",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::OtpInvalid => "Invalid OTP",
            ErrorCode::OtpExpired => "OTP has expired",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::SuperAdminRequired => "Super administrator role is required",
            ErrorCode::NotResourceOwner => "Resource belongs to another account",
            ErrorCode::RoleNotSelfAssignable => "Role cannot be chosen at signup",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::PhoneExists => "Phone number already registered",
            ErrorCode::EmailExists => "Email already registered",
            ErrorCode::AccountBlocked => "Account is blocked",
            ErrorCode::CannotBlockSelf => "Cannot block own account",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::SlotUnavailable => "Selected time slot is already booked",
            ErrorCode::InvalidServiceSelection => "Invalid service selection",
            ErrorCode::InvalidAddonSelection => "Invalid add-on selection",
            ErrorCode::InvalidSpecialist => "Specialist does not belong to this salon",
            ErrorCode::BookingInPast => "Booking date is in the past",
            ErrorCode::InvalidTimeSlot => "Invalid booking date or time",
            ErrorCode::InvalidStatusTransition => "Booking status change not allowed",
            ErrorCode::BookingNotCancellable => "Booking can no longer be cancelled",
            ErrorCode::BookingAlreadyRated => "Booking has already been rated",
            ErrorCode::BookingNotCompleted => "Booking is not completed",
            ErrorCode::HomeServiceUnavailable => "Provider does not offer home service",
            ErrorCode::ServiceLocationRequired => "Service location is required for home service",
            ErrorCode::CartEmpty => "Booking payload is empty",

            // Provider
            ErrorCode::SalonNotFound => "Salon not found",
            ErrorCode::SalonNotVerified => "Salon is not verified",
            ErrorCode::ProfessionalNotFound => "Professional not found",
            ErrorCode::SpecialistNotFound => "Specialist not found",
            ErrorCode::ProviderProfileRequired => "Provider profile details are required",
            ErrorCode::InvalidCoordinates => "Valid latitude and longitude are required",

            // Catalog
            ErrorCode::ServiceItemNotFound => "Service item not found",
            ErrorCode::AddonNotFound => "Add-on not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category already exists for this gender",
            ErrorCode::CategoryInUse => "Category is used by service items",
            ErrorCode::OfferNotFound => "Offer not found",
            ErrorCode::OfferCodeExists => "Offer code already exists",
            ErrorCode::OfferNotApplicable => "Offer cannot be applied",
            ErrorCode::ReviewInvalid => "Review not accepted",

            // Subscription
            ErrorCode::PlanNotFound => "Subscription plan not found",
            ErrorCode::PlanNameExists => "Subscription plan name already exists",
            ErrorCode::SubscriptionInactive => "No active subscription",

            // Sales / Location
            ErrorCode::SalesExecutiveNotFound => "Sales executive not found",
            ErrorCode::SalesmanNotFound => "Salesman not found",
            ErrorCode::ReferralCodeInvalid => "Invalid referral code",
            ErrorCode::ReferralIdExhausted => "Could not allocate a referral id",
            ErrorCode::SalesExecutiveBlocked => "Sales executive is blocked",
            ErrorCode::StateNotFound => "State not found",
            ErrorCode::StateNameExists => "State already exists",
            ErrorCode::CityNameExists => "City already exists in this state",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::RouteNotFound),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::OtpInvalid),
            1006 => Ok(ErrorCode::OtpExpired),
            1007 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::SuperAdminRequired),
            2005 => Ok(ErrorCode::NotResourceOwner),
            2006 => Ok(ErrorCode::RoleNotSelfAssignable),

            // Account
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::PhoneExists),
            3003 => Ok(ErrorCode::EmailExists),
            3004 => Ok(ErrorCode::AccountBlocked),
            3005 => Ok(ErrorCode::CannotBlockSelf),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::SlotUnavailable),
            4003 => Ok(ErrorCode::InvalidServiceSelection),
            4004 => Ok(ErrorCode::InvalidAddonSelection),
            4005 => Ok(ErrorCode::InvalidSpecialist),
            4006 => Ok(ErrorCode::BookingInPast),
            4007 => Ok(ErrorCode::InvalidTimeSlot),
            4008 => Ok(ErrorCode::InvalidStatusTransition),
            4009 => Ok(ErrorCode::BookingNotCancellable),
            4010 => Ok(ErrorCode::BookingAlreadyRated),
            4011 => Ok(ErrorCode::BookingNotCompleted),
            4012 => Ok(ErrorCode::HomeServiceUnavailable),
            4013 => Ok(ErrorCode::ServiceLocationRequired),
            4014 => Ok(ErrorCode::CartEmpty),

            // Provider
            5001 => Ok(ErrorCode::SalonNotFound),
            5002 => Ok(ErrorCode::SalonNotVerified),
            5003 => Ok(ErrorCode::ProfessionalNotFound),
            5004 => Ok(ErrorCode::SpecialistNotFound),
            5005 => Ok(ErrorCode::ProviderProfileRequired),
            5006 => Ok(ErrorCode::InvalidCoordinates),

            // Catalog
            6001 => Ok(ErrorCode::ServiceItemNotFound),
            6002 => Ok(ErrorCode::AddonNotFound),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryNameExists),
            6103 => Ok(ErrorCode::CategoryInUse),
            6201 => Ok(ErrorCode::OfferNotFound),
            6202 => Ok(ErrorCode::OfferCodeExists),
            6203 => Ok(ErrorCode::OfferNotApplicable),
            6301 => Ok(ErrorCode::ReviewInvalid),

            // Subscription
            7001 => Ok(ErrorCode::PlanNotFound),
            7002 => Ok(ErrorCode::PlanNameExists),
            7003 => Ok(ErrorCode::SubscriptionInactive),

            // Sales / Location
            8001 => Ok(ErrorCode::SalesExecutiveNotFound),
            8002 => Ok(ErrorCode::SalesmanNotFound),
            8003 => Ok(ErrorCode::ReferralCodeInvalid),
            8004 => Ok(ErrorCode::ReferralIdExhausted),
            8005 => Ok(ErrorCode::SalesExecutiveBlocked),
            8101 => Ok(ErrorCode::StateNotFound),
            8102 => Ok(ErrorCode::StateNameExists),
            8104 => Ok(ErrorCode::CityNameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::SlotUnavailable.code(), 4002);
        assert_eq!(ErrorCode::SalonNotFound.code(), 5001);
        assert_eq!(ErrorCode::OfferCodeExists.code(), 6202);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::SlotUnavailable));
        assert_eq!(ErrorCode::try_from(8104), Ok(ErrorCode::CityNameExists));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(8103), Err(InvalidErrorCode(8103)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlotUnavailable).unwrap();
        assert_eq!(json, "4002");

        let parsed: ErrorCode = serde_json::from_str("6102").unwrap();
        assert_eq!(parsed, ErrorCode::CategoryNameExists);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::BookingNotFound), "4001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::SlotUnavailable.message(),
            "Selected time slot is already booked"
        );
        assert_eq!(
            ErrorCode::InvalidServiceSelection.message(),
            "Invalid service selection"
        );
        assert_eq!(ErrorCode::RouteNotFound.message(), "Route not found");
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
