//! Data models
//!
//! Shared between salon-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps Unix milliseconds.

pub mod addon;
pub mod auth;
pub mod booking;
pub mod category;
pub mod location;
pub mod offer;
pub mod professional;
pub mod provider;
pub mod review;
pub mod salon;
pub mod sales;
pub mod service_item;
pub mod specialist;
pub mod subscription;
pub mod user;

// Re-exports
pub use addon::*;
pub use auth::*;
pub use booking::*;
pub use category::*;
pub use location::*;
pub use offer::*;
pub use professional::*;
pub use provider::*;
pub use review::*;
pub use salon::*;
pub use sales::*;
pub use service_item::*;
pub use specialist::*;
pub use subscription::*;
pub use user::*;
