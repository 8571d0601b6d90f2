//! Sales hierarchy models
//!
//! A salesman reports to a sales executive. Both carry a referral id that
//! providers quote at signup and a commission rate credited when a referred
//! provider subscribes.

use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SalesStatus {
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalesExecutive {
    pub id: i64,
    pub user_id: i64,
    pub city: String,
    /// `SE-YYYY-XXXXXX`
    pub referral_id: String,
    pub commission_rate: f64,
    pub total_earnings: f64,
    pub status: SalesStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Salesman {
    pub id: i64,
    pub user_id: i64,
    pub sales_executive_id: i64,
    pub city: String,
    /// `SP-YYYY-XXXXXX`
    pub referral_id: String,
    pub commission_rate: f64,
    pub total_earnings: f64,
    pub status: SalesStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Contact columns joined from the user table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalesContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalesExecutiveWithUser {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub executive: SalesExecutive,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub user: SalesContact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalesmanWithUser {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub salesman: Salesman,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub user: SalesContact,
}

/// Registration payload for both sales roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRegistration {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub commission_rate: Option<f64>,
}

/// Registration result. `password` is returned exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRegistered<P> {
    pub user: User,
    pub profile: P,
    pub password: String,
}
