use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, password};
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::user as user_repo;
use shared::models::{UserCreate, UserRole};

/// Server state shared by every handler
///
/// Cheap to clone: the pool and the JWT service are reference counted.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable settings |
/// | pool | SqlitePool | database pool |
/// | jwt_service | Arc<JwtService> | token issue / validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Build state around an existing pool (tests use an in-memory pool)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Open the database, run migrations and seed the super admin
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let db = DbService::new(&config.database_url).await?;
        let state = Self::new(config.clone(), db.pool);
        state.seed_super_admin().await?;
        Ok(state)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Create the configured super admin unless an account with that phone exists
    async fn seed_super_admin(&self) -> Result<(), ServerError> {
        let (Some(phone), Some(plain)) = (
            self.config.super_admin_phone.as_deref(),
            self.config.super_admin_password.as_deref(),
        ) else {
            return Ok(());
        };

        let existing = user_repo::find_by_phone(&self.pool, phone)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        if existing.is_some() {
            return Ok(());
        }

        let password_hash =
            password::hash_password(plain).map_err(|e| ServerError::Config(e.to_string()))?;
        let user = user_repo::create(
            &self.pool,
            UserCreate {
                name: "Super Admin".into(),
                email: None,
                phone: phone.to_string(),
                whatsapp: None,
                password_hash,
                role: UserRole::SuperAdmin,
            },
        )
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;

        tracing::info!(user_id = user.id, "Super admin account seeded");
        Ok(())
    }
}
