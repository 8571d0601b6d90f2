//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use shared::models::{DaySchedule, GovernmentIdInput, LocationInput};
use validator::ValidateEmail;

use crate::booking::slot::{MINUTES_PER_DAY, parse_time};
use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: salon, service, category, specialist, state, city, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, reasons, review comments
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, pincode, offer code, government id number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Phone numbers: 7..=15 digits, optional leading `+`
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let valid = (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(
            AppError::with_message(ErrorCode::InvalidFormat, "Invalid phone number")
                .with_detail("field", "phone"),
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > MAX_EMAIL_LEN || !email.validate_email() {
        return Err(
            AppError::with_message(ErrorCode::InvalidFormat, "Invalid email address")
                .with_detail("field", "email"),
        );
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

/// Finite and within the WGS84 ranges
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "Latitude and longitude must be valid numbers",
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "Latitude must be within ±90 and longitude within ±180",
        ));
    }
    Ok(())
}

/// Money amounts: finite and not negative
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be a non-negative number"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Percentages in `0..=100`
pub fn validate_percent(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between 0 and 100"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Integer range check with a field-tagged error
pub fn validate_range(value: i64, min: i64, max: i64, field: &str) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Coordinates plus the optional postal fields of a provider location
pub fn validate_location(location: &LocationInput) -> Result<(), AppError> {
    validate_coordinates(location.latitude, location.longitude)?;
    validate_optional_text(&location.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&location.city, "city", MAX_NAME_LEN)?;
    validate_optional_text(&location.state, "state", MAX_NAME_LEN)?;
    validate_optional_text(&location.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

pub fn validate_government_id(id: &GovernmentIdInput) -> Result<(), AppError> {
    validate_required_text(&id.id_number, "government_id.id_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&id.id_image_url, "government_id.id_image_url", MAX_URL_LEN)
}

/// Working windows: `HH:MM` bounds with start before end, `24:00` allowed as end
pub fn validate_schedule(schedule: &[DaySchedule], field: &str) -> Result<(), AppError> {
    for day in schedule {
        let start = parse_time(&day.start).ok();
        let end = match day.end.trim() {
            "24:00" => Some(MINUTES_PER_DAY),
            other => parse_time(other).ok(),
        };
        match (start, end) {
            (Some(start), Some(end)) if start < end => {}
            _ => {
                return Err(AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("{field}: {:?} needs HH:MM times with start before end", day.day),
                )
                .with_detail("field", field));
            }
        }
    }
    Ok(())
}

/// Trim, lower-case and drop empty emails
pub fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}
