//! Independent Professional Model

use serde::{Deserialize, Serialize};

use super::addon::AddOn;
use super::provider::{
    DaySchedule, GovIdType, GovernmentIdInput, LocationInput, SubscriptionStatus,
};
use super::service_item::ServiceItem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Independent professional entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct IndependentProfessional {
    pub id: i64,
    pub user_id: i64,
    pub gender: Gender,
    pub experience_years: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub service_types: Vec<String>,
    /// Category ids
    #[cfg_attr(feature = "db", sqlx(json))]
    pub specializations: Vec<i64>,
    pub profile_photo: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub work_photos: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    /// How far the professional travels to customers
    pub radius_km: f64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub availability: Vec<DaySchedule>,
    pub gov_id_type: GovIdType,
    pub gov_id_number: String,
    pub gov_id_image_url: Option<String>,
    pub subscription_plan_id: Option<i64>,
    pub subscription_start: Option<i64>,
    pub subscription_end: Option<i64>,
    pub subscription_status: SubscriptionStatus,
    pub verified_by_admin: bool,
    pub referred_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Professional onboarding payload (part of signup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalCreate {
    pub gender: Gender,
    pub experience_years: i64,
    #[serde(default)]
    pub service_types: Vec<String>,
    pub specializations: Vec<i64>,
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub work_photos: Vec<String>,
    pub location: LocationInput,
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub availability: Vec<DaySchedule>,
    pub government_id: GovernmentIdInput,
}

/// Professional card with the account's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProfessionalCard {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub professional: IndependentProfessional,
    pub name: String,
}

/// Professional with distance from the search point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyProfessional {
    #[serde(flatten)]
    pub professional: ProfessionalCard,
    pub distance_in_meters: f64,
}

/// Public professional page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalDetail {
    #[serde(flatten)]
    pub professional: ProfessionalCard,
    pub service_items: Vec<ServiceItem>,
    pub addons: Vec<AddOn>,
}

/// Home listing query: `men`, `women` or `unisex`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeProfessionalQuery {
    pub category: Option<String>,
}
