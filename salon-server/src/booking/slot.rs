//! Slot arithmetic
//!
//! Times are minutes since midnight. A slot is the half-open interval
//! `[start, end)` on one calendar date and may end at 24:00 but not later.

use chrono::NaiveDate;
use shared::models::BookingDateTime;

use super::BookingError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half-open `[start, end)` window in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: u32,
    pub end: u32,
}

impl Slot {
    /// Slot of `duration_mins` beginning at `start`
    pub fn starting_at(start: u32, duration_mins: u32) -> Result<Self, BookingError> {
        if duration_mins == 0 {
            return Err(BookingError::InvalidTime("duration must be positive".into()));
        }
        let end = start + duration_mins;
        if end > MINUTES_PER_DAY {
            return Err(BookingError::PastMidnight);
        }
        Ok(Self { start, end })
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn start_label(&self) -> String {
        format_time(self.start)
    }

    pub fn end_label(&self) -> String {
        format_time(self.end)
    }
}

/// Parse `HH:MM` (24h) or `h:mm AM/PM`
pub fn parse_time(raw: &str) -> Result<u32, BookingError> {
    let invalid = || BookingError::InvalidTime(raw.to_string());
    let text = raw.trim().to_ascii_uppercase();

    let (clock, meridiem) = if let Some(rest) = text.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = text.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (text.as_str(), None)
    };

    let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    if minute > 59 {
        return Err(invalid());
    }

    let hour = match meridiem {
        None if hour <= 23 => hour,
        Some(is_pm) if (1..=12).contains(&hour) => match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        },
        _ => return Err(invalid()),
    };
    Ok(hour * 60 + minute)
}

/// `HH:MM`, zero padded so labels compare lexicographically
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Calendar date of a booking request, rejecting days before `today`
pub fn booking_date(dt: &BookingDateTime, today: NaiveDate) -> Result<NaiveDate, BookingError> {
    let date = NaiveDate::from_ymd_opt(dt.year, dt.month, dt.day).ok_or_else(|| {
        BookingError::InvalidDate(format!("{:04}-{:02}-{:02}", dt.year, dt.month, dt.day))
    })?;
    if date < today {
        return Err(BookingError::DateInPast);
    }
    Ok(date)
}

/// Parse a `YYYY-MM-DD` filter value
pub fn parse_date(raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(raw.to_string()))
}
