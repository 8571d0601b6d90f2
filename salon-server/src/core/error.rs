use thiserror::Error;

/// Startup and lifecycle failures
///
/// Request-level failures use [`crate::AppError`] instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::AppError> for ServerError {
    fn from(err: crate::AppError) -> Self {
        match err.code {
            shared::ErrorCode::ConfigError => ServerError::Config(err.message),
            shared::ErrorCode::DatabaseError => ServerError::Database(err.message),
            _ => ServerError::Internal(anyhow::anyhow!(err.message)),
        }
    }
}

/// Result alias for server lifecycle code
pub type Result<T> = std::result::Result<T, ServerError>;
