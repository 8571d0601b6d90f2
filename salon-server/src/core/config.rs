use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | DATABASE_URL | salon.db | SQLite file path |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated in debug builds | at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
/// | JWT_ISSUER | salon-server | token issuer |
/// | JWT_AUDIENCE | salon-clients | token audience |
/// | OTP_TTL_SECONDS | 300 | password reset OTP lifetime |
/// | DEFAULT_SEARCH_RADIUS_KM | 5 | proximity search radius |
/// | SUPER_ADMIN_PHONE | - | seeds a super admin with... |
/// | SUPER_ADMIN_PASSWORD | - | ...this password |
///
/// `LOG_DIR` and `LOG_JSON` are read by [`crate::setup_environment`].
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=/data/salon.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file
    pub database_url: String,
    /// development | staging | production
    pub environment: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Password reset OTP lifetime (seconds)
    pub otp_ttl_seconds: i64,
    /// Radius used when a proximity search omits `radius_km`
    pub default_search_radius_km: f64,
    /// Super admin seeded at startup when both are set
    pub super_admin_phone: Option<String>,
    pub super_admin_password: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ServerError> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "salon.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt,
            otp_ttl_seconds: std::env::var("OTP_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            default_search_radius_km: std::env::var("DEFAULT_SEARCH_RADIUS_KM")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|r: &f64| r.is_finite() && *r > 0.0)
                .unwrap_or(5.0),
            super_admin_phone: std::env::var("SUPER_ADMIN_PHONE").ok(),
            super_admin_password: std::env::var("SUPER_ADMIN_PASSWORD").ok(),
        })
    }

    /// Override the database location and port
    ///
    /// Used by tests
    pub fn with_overrides(
        database_url: impl Into<String>,
        http_port: u16,
    ) -> Result<Self, ServerError> {
        let mut config = Self::from_env()?;
        config.database_url = database_url.into();
        config.http_port = http_port;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
