//! Add-on Model

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;

/// Optional extra sold alongside services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AddOn {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration_mins: i64,
    pub image_url: Option<String>,
    pub is_recommended: bool,
    pub provider_type: ProviderKind,
    pub provider_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnCreate {
    pub name: String,
    pub price: f64,
    pub duration_mins: Option<i64>,
    pub image_url: Option<String>,
    pub is_recommended: Option<bool>,
}

/// Update add-on payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddOnUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration_mins: Option<i64>,
    pub image_url: Option<String>,
    pub is_recommended: Option<bool>,
}
