//! Authentication DTOs

use serde::{Deserialize, Serialize};

use super::professional::{IndependentProfessional, ProfessionalCreate};
use super::sales::{SalesExecutive, Salesman};
use super::salon::{Salon, SalonCreate};
use super::user::{User, UserRole};

/// Signup payload
///
/// `salon` is required for `salon_owner`, `professional` for
/// `independent_pro`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub salon: Option<SalonCreate>,
    pub professional: Option<ProfessionalCreate>,
    /// Salesman referral id (`SP-YYYY-XXXXXX`)
    pub referral_code: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Customer
}

/// Login by phone or email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Profile attached to an account, by role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "profile", rename_all = "snake_case")]
pub enum RoleDetails {
    Salon(Salon),
    Professional(IndependentProfessional),
    SalesExecutive(SalesExecutive),
    Salesman(Salesman),
}

impl RoleDetails {
    pub fn id(&self) -> i64 {
        match self {
            Self::Salon(s) => s.id,
            Self::Professional(p) => p.id,
            Self::SalesExecutive(e) => e.id,
            Self::Salesman(s) => s.id,
        }
    }
}

/// Account with its role profile, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRole {
    pub user: User,
    pub role_details: Option<RoleDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub role_details: Option<RoleDetails>,
}

/// Identifies the account for the password reset flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub otp: String,
    pub new_password: String,
}

/// Admin password reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPasswordReset {
    pub new_password: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_defaults_to_customer() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"name":"Asha","phone":"9000000001","password":"secret1"}"#)
                .unwrap();
        assert_eq!(req.role, UserRole::Customer);
        assert!(req.salon.is_none());
        assert!(req.referral_code.is_none());
    }

    #[test]
    fn test_role_details_tagging() {
        let details = RoleDetails::Salesman(Salesman {
            id: 5,
            user_id: 1,
            sales_executive_id: 2,
            city: "Pune".into(),
            referral_id: "SP-2030-ABCDEF".into(),
            commission_rate: 0.05,
            total_earnings: 0.0,
            status: crate::models::SalesStatus::Active,
            created_at: 0,
            updated_at: 0,
        });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "salesman");
        assert_eq!(json["profile"]["id"], 5);
        assert_eq!(details.id(), 5);
    }
}
