//! Types shared by salons and independent professionals

use serde::{Deserialize, Serialize};

/// Which kind of provider owns a catalog entry or a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ProviderKind {
    Salon,
    IndependentProfessional,
}

/// Government ID document type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum GovIdType {
    Aadhar,
    Pan,
    Dl,
}

/// Provider subscription payment state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SubscriptionStatus {
    Pending,
    Paid,
    Expired,
}

/// Day of week used by opening hours and availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// One day's working window, `HH:MM` 24h
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

/// Government ID submitted at onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentIdInput {
    pub id_type: GovIdType,
    pub id_number: String,
    pub id_image_url: Option<String>,
}

/// Postal location with coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInput {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

/// Proximity search parameters
///
/// Coordinates stay optional so a missing value is reported as a
/// validation error instead of a query rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub category: Option<String>,
}

/// Subscription snapshot of a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProviderSubscription {
    pub subscription_plan_id: Option<i64>,
    pub subscription_start: Option<i64>,
    pub subscription_end: Option<i64>,
    pub subscription_status: SubscriptionStatus,
    pub referred_by: Option<i64>,
}

impl ProviderSubscription {
    /// Paid, on a plan, and not past its end date
    pub fn is_active_at(&self, now_millis: i64) -> bool {
        self.subscription_plan_id.is_some()
            && self.subscription_status == SubscriptionStatus::Paid
            && self.subscription_end.is_some_and(|end| end > now_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(status: SubscriptionStatus, end: Option<i64>) -> ProviderSubscription {
        ProviderSubscription {
            subscription_plan_id: Some(1),
            subscription_start: Some(0),
            subscription_end: end,
            subscription_status: status,
            referred_by: None,
        }
    }

    #[test]
    fn test_subscription_active_window() {
        assert!(sub(SubscriptionStatus::Paid, Some(2_000)).is_active_at(1_000));
        assert!(!sub(SubscriptionStatus::Paid, Some(1_000)).is_active_at(1_000));
        assert!(!sub(SubscriptionStatus::Pending, Some(2_000)).is_active_at(1_000));
        assert!(!sub(SubscriptionStatus::Paid, None).is_active_at(1_000));
    }

    #[test]
    fn test_subscription_requires_plan() {
        let mut s = sub(SubscriptionStatus::Paid, Some(2_000));
        s.subscription_plan_id = None;
        assert!(!s.is_active_at(1_000));
    }

    #[test]
    fn test_weekday_serialization() {
        let schedule = DaySchedule {
            day: Weekday::Mon,
            start: "09:00".into(),
            end: "18:00".into(),
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains("\"day\":\"Mon\""));
    }
}
