//! State / City lookup models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct State {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub code: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCreate {
    pub name: String,
    pub country: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct City {
    pub id: i64,
    pub name: String,
    pub state_id: i64,
    pub country: String,
    pub pincode: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityCreate {
    pub name: String,
    pub state_id: i64,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub state_id: Option<i64>,
}
