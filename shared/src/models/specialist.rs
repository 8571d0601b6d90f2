//! Specialist Model

use serde::{Deserialize, Serialize};

use super::provider::DaySchedule;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Expertise {
    Hair,
    Skin,
    Makeup,
    Massage,
    Nails,
    Other,
}

/// Staff member of a salon who can be requested at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Specialist {
    pub id: i64,
    pub salon_id: i64,
    pub name: String,
    pub contact_number: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub expertise: Vec<Expertise>,
    pub experience_years: i64,
    pub image_url: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub certifications: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub availability: Vec<DaySchedule>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create specialist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistCreate {
    pub name: String,
    pub contact_number: Option<String>,
    #[serde(default)]
    pub expertise: Vec<Expertise>,
    pub experience_years: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub availability: Vec<DaySchedule>,
}

/// Update specialist payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialistUpdate {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub expertise: Option<Vec<Expertise>>,
    pub experience_years: Option<i64>,
    pub image_url: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub availability: Option<Vec<DaySchedule>>,
}
