//! Review Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub salon_id: i64,
    pub user_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub images: Vec<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub salon_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Review with the reviewer's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewWithUser {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub review: Review,
    pub user_name: String,
}
