//! Offer Repository
//!
//! Codes are stored upper-case and compared without case.

use super::{RepoError, RepoResult};
use shared::models::{Offer, OfferCreate, OfferUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Offer>> {
    let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offer WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(offer)
}

pub async fn find_by_code(
    conn: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
    code: &str,
) -> RepoResult<Option<Offer>> {
    let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offer WHERE code = ?")
        .bind(code.trim().to_uppercase())
        .fetch_optional(conn)
        .await?;
    Ok(offer)
}

/// Active offers that have not expired at `now`
pub async fn find_available(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Offer>> {
    let offers = sqlx::query_as::<_, Offer>(
        "SELECT * FROM offer WHERE is_active = 1 AND valid_until > ? ORDER BY valid_until",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(offers)
}

pub async fn create(pool: &SqlitePool, data: &OfferCreate) -> RepoResult<Offer> {
    let now = now_millis();
    let offer = sqlx::query_as::<_, Offer>(
        "INSERT INTO offer (id, title, description, discount_type, discount_value, \
         min_booking_amount, code, valid_until, category_id, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.title.trim())
    .bind(&data.description)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.min_booking_amount.unwrap_or(0.0))
    .bind(data.code.trim().to_uppercase())
    .bind(data.valid_until)
    .bind(data.category_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(offer)
}

pub async fn update(pool: &SqlitePool, id: i64, data: &OfferUpdate) -> RepoResult<Offer> {
    sqlx::query_as::<_, Offer>(
        "UPDATE offer SET title = COALESCE(?1, title), description = COALESCE(?2, description), \
         discount_type = COALESCE(?3, discount_type), discount_value = COALESCE(?4, discount_value), \
         min_booking_amount = COALESCE(?5, min_booking_amount), code = COALESCE(?6, code), \
         valid_until = COALESCE(?7, valid_until), category_id = COALESCE(?8, category_id), \
         is_active = COALESCE(?9, is_active), updated_at = ?10 \
         WHERE id = ?11 RETURNING *",
    )
    .bind(data.title.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.min_booking_amount)
    .bind(data.code.as_deref().map(|c| c.trim().to_uppercase()))
    .bind(data.valid_until)
    .bind(data.category_id)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM offer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Offer {id} not found")));
    }
    Ok(())
}
