//! User Model

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum UserRole {
    Customer,
    SalonOwner,
    IndependentPro,
    Admin,
    SuperAdmin,
    SalesExecutive,
    Salesman,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::SalonOwner => "salon_owner",
            Self::IndependentPro => "independent_pro",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::SalesExecutive => "sales_executive",
            Self::Salesman => "salesman",
        }
    }

    /// `admin` and `super_admin` both moderate the marketplace
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Roles a visitor may pick at signup
    pub fn is_self_assignable(&self) -> bool {
        matches!(
            self,
            Self::Customer | Self::SalonOwner | Self::IndependentPro
        )
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "salon_owner" => Ok(Self::SalonOwner),
            "independent_pro" => Ok(Self::IndependentPro),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            "sales_executive" => Ok(Self::SalesExecutive),
            "salesman" => Ok(Self::Salesman),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AccountStatus {
    Active,
    Blocked,
}

/// User entity
///
/// Password hash and reset OTP never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub whatsapp: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub status: AccountStatus,
    #[serde(skip_serializing, default)]
    pub reset_otp_hash: Option<String>,
    #[serde(skip_serializing, default)]
    pub reset_otp_expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    pub fn is_blocked(&self) -> bool {
        self.status == AccountStatus::Blocked
    }
}

/// Internal create payload (password already hashed)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

/// Admin user listing filter
///
/// Paging fields are spelled out instead of flattened: query strings
/// deliver every value as text, which flattened numeric fields reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl UserListQuery {
    pub fn pagination(&self) -> crate::request::PaginationQuery {
        let defaults = crate::request::PaginationQuery::default();
        crate::request::PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}
