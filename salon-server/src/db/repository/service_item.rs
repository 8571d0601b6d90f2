//! Service Item Repository
//!
//! Every query is scoped by `(provider_type, provider_id)`; an item owned
//! by another provider reads as missing.

use super::{RepoError, RepoResult};
use shared::models::{ProviderKind, ServiceItem, ServiceItemCreate, ServiceItemUpdate, ServiceStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::{Sqlite, SqlitePool};

/// Default service length in minutes
pub const DEFAULT_DURATION_MINS: i64 = 30;

pub async fn find_by_provider(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
) -> RepoResult<Vec<ServiceItem>> {
    let items = sqlx::query_as::<_, ServiceItem>(
        "SELECT * FROM service_item WHERE provider_type = ? AND provider_id = ? \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(kind)
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Active items only, for public pages
pub async fn find_active_by_provider(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
) -> RepoResult<Vec<ServiceItem>> {
    let items = sqlx::query_as::<_, ServiceItem>(
        "SELECT * FROM service_item WHERE provider_type = ? AND provider_id = ? AND status = 'active' \
         ORDER BY name",
    )
    .bind(kind)
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_owned(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    id: i64,
) -> RepoResult<Option<ServiceItem>> {
    let item = sqlx::query_as::<_, ServiceItem>(
        "SELECT * FROM service_item WHERE id = ? AND provider_type = ? AND provider_id = ?",
    )
    .bind(id)
    .bind(kind)
    .bind(provider_id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Load a set of ids for one provider inside a booking transaction
pub async fn find_many_owned(
    conn: &mut sqlx::SqliteConnection,
    kind: ProviderKind,
    provider_id: i64,
    ids: &[i64],
) -> RepoResult<Vec<ServiceItem>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT * FROM service_item WHERE provider_type = ? AND provider_id = ? AND id IN ({placeholders})"
    );
    let mut query = sqlx::query_as::<_, ServiceItem>(&sql)
        .bind(kind)
        .bind(provider_id);
    for id in ids {
        query = query.bind(*id);
    }
    let items = query.fetch_all(&mut *conn).await?;
    Ok(items)
}

pub async fn create(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    data: &ServiceItemCreate,
) -> RepoResult<ServiceItem> {
    let now = now_millis();
    let item = sqlx::query_as::<_, ServiceItem>(
        "INSERT INTO service_item (id, name, category_id, price, duration_mins, discount_percent, \
         description, image_url, status, provider_type, provider_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.category_id)
    .bind(data.price)
    .bind(data.duration_mins.unwrap_or(DEFAULT_DURATION_MINS))
    .bind(data.discount_percent.unwrap_or(0.0))
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.status.unwrap_or(ServiceStatus::Active))
    .bind(kind)
    .bind(provider_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn update(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    id: i64,
    data: &ServiceItemUpdate,
) -> RepoResult<ServiceItem> {
    sqlx::query_as::<_, ServiceItem>(
        "UPDATE service_item SET name = COALESCE(?1, name), category_id = COALESCE(?2, category_id), \
         price = COALESCE(?3, price), duration_mins = COALESCE(?4, duration_mins), \
         discount_percent = COALESCE(?5, discount_percent), description = COALESCE(?6, description), \
         image_url = COALESCE(?7, image_url), status = COALESCE(?8, status), updated_at = ?9 \
         WHERE id = ?10 AND provider_type = ?11 AND provider_id = ?12 RETURNING *",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.category_id)
    .bind(data.price)
    .bind(data.duration_mins)
    .bind(data.discount_percent)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .bind(kind)
    .bind(provider_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Service item {id} not found")))
}

pub async fn delete(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    id: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "DELETE FROM service_item WHERE id = ? AND provider_type = ? AND provider_id = ?",
    )
    .bind(id)
    .bind(kind)
    .bind(provider_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service item {id} not found")));
    }
    Ok(())
}

pub async fn count_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM service_item WHERE category_id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
