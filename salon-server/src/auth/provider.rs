//! Provider ownership
//!
//! Salon owners and independent professionals manage their own catalog. The
//! profile is found through the token's `role_id`, falling back to the
//! account id when the token predates the profile.

use shared::models::{ProviderKind, ProviderSubscription, UserRole};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{professional as professional_repo, salon as salon_repo};
use crate::utils::{AppError, AppResult, ErrorCode};

/// The salon or professional profile owned by the caller
#[derive(Debug, Clone)]
pub struct OwnedProvider {
    pub kind: ProviderKind,
    pub id: i64,
    pub subscription: ProviderSubscription,
}

impl OwnedProvider {
    /// Resolve the caller's provider profile
    ///
    /// # Errors
    ///
    /// - 403 RoleRequired for roles that never own a provider
    /// - 400 ProviderProfileRequired when the profile is missing
    pub async fn resolve(pool: &SqlitePool, user: &CurrentUser) -> AppResult<Self> {
        let (kind, found) = match user.role {
            UserRole::SalonOwner => {
                let salon = match user.role_id {
                    Some(id) => salon_repo::find_by_id(pool, id)
                        .await?
                        .filter(|s| s.owner_id == user.id),
                    None => None,
                };
                let salon = match salon {
                    Some(s) => Some(s),
                    None => salon_repo::find_by_owner(pool, user.id).await?,
                };
                (
                    ProviderKind::Salon,
                    salon.map(|s| {
                        (
                            s.id,
                            ProviderSubscription {
                                subscription_plan_id: s.subscription_plan_id,
                                subscription_start: s.subscription_start,
                                subscription_end: s.subscription_end,
                                subscription_status: s.subscription_status,
                                referred_by: s.referred_by,
                            },
                        )
                    }),
                )
            }
            UserRole::IndependentPro => {
                let pro = professional_repo::find_by_user(pool, user.id).await?;
                (
                    ProviderKind::IndependentProfessional,
                    pro.map(|p| {
                        (
                            p.id,
                            ProviderSubscription {
                                subscription_plan_id: p.subscription_plan_id,
                                subscription_start: p.subscription_start,
                                subscription_end: p.subscription_end,
                                subscription_status: p.subscription_status,
                                referred_by: p.referred_by,
                            },
                        )
                    }),
                )
            }
            _ => {
                return Err(AppError::with_message(
                    ErrorCode::RoleRequired,
                    "Only salon owners and independent professionals manage a catalog",
                ));
            }
        };

        let (id, subscription) = found.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProviderProfileRequired,
                "No provider profile is linked to this account",
            )
        })?;

        Ok(Self {
            kind,
            id,
            subscription,
        })
    }

    /// Salon owners only
    pub fn salon_id(&self) -> AppResult<i64> {
        match self.kind {
            ProviderKind::Salon => Ok(self.id),
            ProviderKind::IndependentProfessional => Err(AppError::with_message(
                ErrorCode::RoleRequired,
                "This action requires role: salon_owner",
            )),
        }
    }
}
