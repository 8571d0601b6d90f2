//! Salon Model

use serde::{Deserialize, Serialize};

use super::addon::AddOn;
use super::provider::{
    DaySchedule, GovIdType, GovernmentIdInput, LocationInput, SubscriptionStatus,
};
use super::review::ReviewWithUser;
use super::service_item::ServiceItem;
use super::specialist::Specialist;

/// Salon ownership structure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ShopType {
    Personal,
    Partnership,
}

/// Salon audience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SalonCategory {
    Men,
    BeautyParlour,
    Unisex,
    Spa,
}

impl std::str::FromStr for SalonCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Self::Men),
            "beauty_parlour" | "beautyParlour" => Ok(Self::BeautyParlour),
            "unisex" => Ok(Self::Unisex),
            "spa" => Ok(Self::Spa),
            other => Err(format!("unknown salon category: {other}")),
        }
    }
}

/// Business partner listed on a partnership salon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub contact_number: Option<String>,
    pub whatsapp_number: Option<String>,
}

/// Salon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Salon {
    pub id: i64,
    pub owner_id: i64,
    pub shop_type: ShopType,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub partners: Vec<Partner>,
    pub shop_name: String,
    pub about: Option<String>,
    pub contact_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub salon_category: SalonCategory,
    pub offers_home_service: bool,
    pub number_of_staff: Option<i64>,
    pub opening_date: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub opening_hours: Vec<DaySchedule>,
    pub registration_number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub gallery_images: Vec<String>,
    pub gov_id_type: GovIdType,
    pub gov_id_number: String,
    pub gov_id_image_url: Option<String>,
    pub subscription_plan_id: Option<i64>,
    pub subscription_start: Option<i64>,
    pub subscription_end: Option<i64>,
    pub subscription_status: SubscriptionStatus,
    pub verified_by_admin: bool,
    pub referred_by: Option<i64>,
    pub onboarded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Salon onboarding payload (part of owner signup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonCreate {
    pub shop_type: ShopType,
    #[serde(default)]
    pub partners: Vec<Partner>,
    pub shop_name: String,
    pub about: Option<String>,
    pub contact_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub salon_category: SalonCategory,
    #[serde(default)]
    pub offers_home_service: bool,
    pub number_of_staff: Option<i64>,
    pub opening_date: Option<String>,
    #[serde(default)]
    pub opening_hours: Vec<DaySchedule>,
    pub registration_number: Option<String>,
    pub location: LocationInput,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub government_id: GovernmentIdInput,
}

/// Salon with distance from the search point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySalon {
    #[serde(flatten)]
    pub salon: Salon,
    pub distance_in_meters: f64,
}

/// Salon ranked by review score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FeaturedSalon {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub salon: Salon,
    pub average_rating: f64,
    pub total_reviews: i64,
}

/// Home page salon card with a few service category names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSalon {
    #[serde(flatten)]
    pub salon: Salon,
    pub service_categories: Vec<String>,
}

/// Full public salon page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonDetail {
    #[serde(flatten)]
    pub salon: Salon,
    pub specialists: Vec<Specialist>,
    pub service_items: Vec<ServiceItem>,
    pub addons: Vec<AddOn>,
    pub reviews: Vec<ReviewWithUser>,
}

/// Home listing query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeSalonQuery {
    pub category: Option<String>,
}

/// Location correction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonLocationUpdate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salon_category_parse() {
        assert_eq!("men".parse::<SalonCategory>(), Ok(SalonCategory::Men));
        assert_eq!(
            "beautyParlour".parse::<SalonCategory>(),
            Ok(SalonCategory::BeautyParlour)
        );
        assert_eq!(
            "beauty_parlour".parse::<SalonCategory>(),
            Ok(SalonCategory::BeautyParlour)
        );
        assert!("barber".parse::<SalonCategory>().is_err());
    }

    #[test]
    fn test_salon_create_defaults() {
        let json = r#"{
            "shop_type": "personal",
            "shop_name": "Glow Studio",
            "salon_category": "unisex",
            "location": {"latitude": 12.97, "longitude": 77.59},
            "government_id": {"id_type": "pan", "id_number": "ABCDE1234F"}
        }"#;
        let create: SalonCreate = serde_json::from_str(json).unwrap();
        assert!(!create.offers_home_service);
        assert!(create.partners.is_empty());
        assert!(create.opening_hours.is_empty());
        assert_eq!(create.government_id.id_type, GovIdType::Pan);
    }
}
