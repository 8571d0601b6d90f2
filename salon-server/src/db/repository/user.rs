//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{AccountStatus, User, UserCreate, UserRole};
use shared::request::PaginationQuery;
use shared::util::{now_millis, snowflake_id};
use sqlx::{Sqlite, SqlitePool};

const COLUMNS: &str = "id, name, email, phone, whatsapp, password_hash, role, is_verified, status, \
     reset_otp_hash, reset_otp_expires_at, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE phone = ?"))
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Email column is NOCASE; callers still pass the lower-cased form
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Login / reset lookup: phone wins when both are given
pub async fn find_by_identifier(
    pool: &SqlitePool,
    phone: Option<&str>,
    email: Option<&str>,
) -> RepoResult<Option<User>> {
    match (phone, email) {
        (Some(phone), _) => find_by_phone(pool, phone).await,
        (None, Some(email)) => find_by_email(pool, email).await,
        (None, None) => Ok(None),
    }
}

pub async fn create(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    data: UserCreate,
) -> RepoResult<User> {
    let now = now_millis();
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO user (id, name, email, phone, whatsapp, password_hash, role, is_verified, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, 'active', ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(snowflake_id())
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.whatsapp)
    .bind(&data.password_hash)
    .bind(data.role)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(user)
}

/// Newest first, optional role filter
pub async fn list(
    pool: &SqlitePool,
    role: Option<UserRole>,
    page: &PaginationQuery,
) -> RepoResult<(Vec<User>, i64)> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user WHERE (?1 IS NULL OR role = ?1) \
         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
    ))
    .bind(role)
    .bind(page.limit() as i64)
    .bind(page.offset() as i64)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE (?1 IS NULL OR role = ?1)")
        .bind(role)
        .fetch_one(pool)
        .await?;

    Ok((users, total))
}

pub async fn set_verified(pool: &SqlitePool, id: i64, verified: bool) -> RepoResult<User> {
    let rows = sqlx::query("UPDATE user SET is_verified = ?, updated_at = ? WHERE id = ?")
        .bind(verified)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: AccountStatus) -> RepoResult<User> {
    let rows = sqlx::query("UPDATE user SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Replace the password and clear any pending reset OTP
pub async fn set_password(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE user SET password_hash = ?, reset_otp_hash = NULL, reset_otp_expires_at = NULL, \
         updated_at = ? WHERE id = ?",
    )
    .bind(password_hash)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

pub async fn set_reset_otp(
    pool: &SqlitePool,
    id: i64,
    otp_hash: &str,
    expires_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE user SET reset_otp_hash = ?, reset_otp_expires_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(otp_hash)
    .bind(expires_at)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
