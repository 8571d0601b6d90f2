//! Repository Module
//!
//! Free async functions over `&SqlitePool`, one module per table group.
//! Functions that also run inside a transaction take
//! `impl sqlx::Executor<'_, Database = Sqlite>` instead.

pub mod addon;
pub mod booking;
pub mod category;
pub mod location;
pub mod offer;
pub mod professional;
pub mod review;
pub mod salon;
pub mod sales;
pub mod service_item;
pub mod specialist;
pub mod subscription;
pub mod user;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database("Database error")
            }
        }
    }
}

impl RepoError {
    /// Convert, reporting a unique violation with a resource specific code
    pub fn or_duplicate(self, code: ErrorCode) -> AppError {
        match self {
            RepoError::Duplicate(_) => AppError::new(code),
            other => other.into(),
        }
    }

    /// Convert, reporting a missing row with a resource specific code
    pub fn or_not_found(self, code: ErrorCode) -> AppError {
        match self {
            RepoError::NotFound(msg) => AppError::with_message(code, msg),
            other => other.into(),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by repository tests

    use shared::models::{
        GovIdType, GovernmentIdInput, LocationInput, Salon, SalonCategory, SalonCreate, ShopType,
        UserCreate, UserRole,
    };
    use sqlx::SqlitePool;

    use crate::db::DbService;

    pub async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    pub async fn user(pool: &SqlitePool, phone: &str, role: UserRole) -> i64 {
        super::user::create(
            pool,
            UserCreate {
                name: format!("User {phone}"),
                email: None,
                phone: phone.to_string(),
                whatsapp: None,
                password_hash: "$argon2id$test".into(),
                role,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub fn salon_create(lat: f64, lon: f64, category: SalonCategory) -> SalonCreate {
        SalonCreate {
            shop_type: ShopType::Personal,
            partners: vec![],
            shop_name: "Glow Studio".into(),
            about: None,
            contact_number: None,
            whatsapp_number: None,
            salon_category: category,
            offers_home_service: false,
            number_of_staff: Some(3),
            opening_date: None,
            opening_hours: vec![],
            registration_number: None,
            location: LocationInput {
                latitude: lat,
                longitude: lon,
                address: Some("MG Road".into()),
                city: Some("Bengaluru".into()),
                state: Some("Karnataka".into()),
                pincode: Some("560001".into()),
            },
            logo_url: None,
            cover_image_url: None,
            gallery_images: vec!["a.jpg".into()],
            government_id: GovernmentIdInput {
                id_type: GovIdType::Pan,
                id_number: "ABCDE1234F".into(),
                id_image_url: None,
            },
        }
    }

    /// Owner account plus a verified salon
    pub async fn verified_salon(pool: &SqlitePool, phone: &str) -> Salon {
        let owner = user(pool, phone, UserRole::SalonOwner).await;
        let salon = super::salon::create(
            pool,
            owner,
            &salon_create(12.97, 77.59, SalonCategory::Unisex),
            None,
            None,
        )
        .await
        .unwrap();
        super::salon::set_verified(pool, salon.id).await.unwrap()
    }

    pub async fn category(pool: &SqlitePool, name: &str) -> i64 {
        super::category::create(
            pool,
            &shared::models::CategoryCreate {
                name: name.to_string(),
                gender: shared::models::CategoryGender::Unisex,
                icon: None,
            },
        )
        .await
        .unwrap()
        .id
    }
}
