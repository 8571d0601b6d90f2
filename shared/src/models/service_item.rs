//! Service Item Model

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ServiceStatus {
    Active,
    Inactive,
}

/// Bookable service offered by a salon or a professional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceItem {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub price: f64,
    pub duration_mins: i64,
    pub discount_percent: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: ServiceStatus,
    pub provider_type: ProviderKind,
    pub provider_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create service item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItemCreate {
    pub name: String,
    pub category_id: i64,
    pub price: f64,
    pub duration_mins: Option<i64>,
    pub discount_percent: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ServiceStatus>,
}

/// Update service item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceItemUpdate {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<f64>,
    pub duration_mins: Option<i64>,
    pub discount_percent: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ServiceStatus>,
}
