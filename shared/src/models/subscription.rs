//! Subscription Plan Model

use serde::{Deserialize, Serialize};

use super::provider::SubscriptionStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration_in_days: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create plan payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlanCreate {
    pub name: String,
    pub price: f64,
    pub duration_in_days: i64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: i64,
}

/// Provider subscription status view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatusView {
    pub is_active: bool,
    pub plan: Option<SubscriptionPlan>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub payment_status: SubscriptionStatus,
}
