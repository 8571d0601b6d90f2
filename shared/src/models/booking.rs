//! Booking Model

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;

/// Booking lifecycle
///
/// ```text
/// pending ──► confirmed ──► in_progress ──► completed
///    │            │
///    └► cancelled ◄┤
///                 └► no_show
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Statuses that hold a time slot
    pub const SLOT_HOLDING: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    pub fn holds_slot(&self) -> bool {
        Self::SLOT_HOLDING.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
                | (InProgress, Completed)
        )
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BookingType {
    #[default]
    InSalon,
    HomeService,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
    Upi,
    Card,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub provider_type: ProviderKind,
    pub provider_id: i64,
    pub specialist_id: Option<i64>,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`, exclusive
    pub end_time: String,
    pub duration_mins: i64,
    pub booking_type: BookingType,
    pub service_address: Option<String>,
    pub service_latitude: Option<f64>,
    pub service_longitude: Option<f64>,
    pub subtotal_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub offer_id: Option<i64>,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub notes: Option<String>,
    pub rating_score: Option<i64>,
    pub rating_feedback: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Service line snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingServiceLine {
    pub id: i64,
    pub booking_id: i64,
    pub service_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub duration_mins: i64,
}

/// Add-on line snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingAddonLine {
    pub id: i64,
    pub booking_id: i64,
    pub addon_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Booking joined with its lines and the counterpart's display info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub services: Vec<BookingServiceLine>,
    pub addons: Vec<BookingAddonLine>,
}

// =============================================================================
// Requests
// =============================================================================

/// Calendar date plus wall-clock time as sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// `HH:MM` or `h:mm AM/PM`
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonSelection {
    pub addon_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// One salon's part of a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    pub salon_id: i64,
    pub services: Vec<i64>,
    #[serde(default)]
    pub addons: Vec<AddonSelection>,
    pub specialist_id: Option<i64>,
    pub booking_date_time: BookingDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Multi-salon cart booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartBookingRequest {
    #[serde(default)]
    pub booking_type: BookingType,
    pub service_location: Option<ServiceLocation>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub offer_code: Option<String>,
    #[serde(default)]
    pub salons: Vec<CartEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartBookingResponse {
    pub bookings: Vec<BookingDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingCancel {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRating {
    pub score: i64,
    pub feedback: Option<String>,
}

/// Provider-side listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalonBookingQuery {
    pub date: Option<String>,
    pub status: Option<BookingStatus>,
}
