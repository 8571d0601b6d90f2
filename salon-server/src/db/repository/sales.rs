//! Sales Hierarchy Repository
//!
//! Sales executives and the salesmen reporting to them.

use super::{RepoError, RepoResult};
use crate::booking::pricing::{commission, to_decimal, to_f64};
use shared::models::{SalesExecutive, SalesExecutiveWithUser, Salesman, SalesmanWithUser};
use shared::util::{now_millis, snowflake_id};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

const EXECUTIVE_SELECT: &str = "SELECT e.*, u.name, u.email, u.phone FROM sales_executive e \
     JOIN user u ON u.id = e.user_id";

const SALESMAN_SELECT: &str = "SELECT s.*, u.name, u.email, u.phone FROM salesman s \
     JOIN user u ON u.id = s.user_id";

// =============================================================================
// Sales executives
// =============================================================================

pub async fn find_executive(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<SalesExecutive>> {
    let exec = sqlx::query_as::<_, SalesExecutive>("SELECT * FROM sales_executive WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(exec)
}

pub async fn find_executive_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Option<SalesExecutive>> {
    let exec =
        sqlx::query_as::<_, SalesExecutive>("SELECT * FROM sales_executive WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(exec)
}

pub async fn executive_referral_taken(conn: &mut SqliteConnection, referral_id: &str) -> RepoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sales_executive WHERE referral_id = ?")
            .bind(referral_id)
            .fetch_one(&mut *conn)
            .await?;
    Ok(count > 0)
}

pub async fn create_executive(
    conn: &mut SqliteConnection,
    user_id: i64,
    city: &str,
    referral_id: &str,
    commission_rate: f64,
) -> RepoResult<SalesExecutive> {
    let now = now_millis();
    let exec = sqlx::query_as::<_, SalesExecutive>(
        "INSERT INTO sales_executive (id, user_id, city, referral_id, commission_rate, \
         total_earnings, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 0, 'active', ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(user_id)
    .bind(city.trim())
    .bind(referral_id)
    .bind(commission_rate)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(exec)
}

pub async fn list_executives(pool: &SqlitePool) -> RepoResult<Vec<SalesExecutiveWithUser>> {
    let execs = sqlx::query_as::<_, SalesExecutiveWithUser>(&format!(
        "{EXECUTIVE_SELECT} ORDER BY e.created_at DESC, e.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(execs)
}

pub async fn list_executives_by_city(
    pool: &SqlitePool,
    city: &str,
) -> RepoResult<Vec<SalesExecutiveWithUser>> {
    let execs = sqlx::query_as::<_, SalesExecutiveWithUser>(&format!(
        "{EXECUTIVE_SELECT} WHERE e.city = ? COLLATE NOCASE ORDER BY e.created_at DESC, e.id DESC"
    ))
    .bind(city.trim())
    .fetch_all(pool)
    .await?;
    Ok(execs)
}

// =============================================================================
// Salesmen
// =============================================================================

pub async fn find_salesman(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Salesman>> {
    let salesman = sqlx::query_as::<_, Salesman>("SELECT * FROM salesman WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(salesman)
}

pub async fn find_salesman_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Salesman>> {
    let salesman = sqlx::query_as::<_, Salesman>("SELECT * FROM salesman WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(salesman)
}

/// Referral codes are matched without case
pub async fn find_salesman_by_referral(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    referral_id: &str,
) -> RepoResult<Option<Salesman>> {
    let salesman = sqlx::query_as::<_, Salesman>(
        "SELECT * FROM salesman WHERE referral_id = ? COLLATE NOCASE",
    )
    .bind(referral_id.trim())
    .fetch_optional(conn)
    .await?;
    Ok(salesman)
}

pub async fn salesman_referral_taken(conn: &mut SqliteConnection, referral_id: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salesman WHERE referral_id = ?")
        .bind(referral_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

pub async fn create_salesman(
    conn: &mut SqliteConnection,
    user_id: i64,
    sales_executive_id: i64,
    city: &str,
    referral_id: &str,
    commission_rate: f64,
) -> RepoResult<Salesman> {
    let now = now_millis();
    let salesman = sqlx::query_as::<_, Salesman>(
        "INSERT INTO salesman (id, user_id, sales_executive_id, city, referral_id, commission_rate, \
         total_earnings, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 0, 'active', ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(user_id)
    .bind(sales_executive_id)
    .bind(city.trim())
    .bind(referral_id)
    .bind(commission_rate)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(salesman)
}

/// Salesmen newest first, optionally one executive's team
pub async fn list_salesmen(
    pool: &SqlitePool,
    sales_executive_id: Option<i64>,
) -> RepoResult<Vec<SalesmanWithUser>> {
    let salesmen = sqlx::query_as::<_, SalesmanWithUser>(&format!(
        "{SALESMAN_SELECT} WHERE (?1 IS NULL OR s.sales_executive_id = ?1) \
         ORDER BY s.created_at DESC, s.id DESC"
    ))
    .bind(sales_executive_id)
    .fetch_all(pool)
    .await?;
    Ok(salesmen)
}

// =============================================================================
// Commission
// =============================================================================

/// Credit a salesman and their executive for a subscription of `amount`
pub async fn credit_commission(
    conn: &mut SqliteConnection,
    salesman_id: i64,
    amount: f64,
) -> RepoResult<()> {
    let Some(salesman) = find_salesman(&mut *conn, salesman_id).await? else {
        tracing::warn!(salesman_id, "Referring salesman no longer exists, no commission credited");
        return Ok(());
    };

    let earned = commission(amount, salesman.commission_rate);
    add_earnings(conn, "salesman", salesman.id, salesman.total_earnings, earned).await?;

    let exec = find_executive(&mut *conn, salesman.sales_executive_id)
        .await?
        .ok_or_else(|| {
            RepoError::NotFound(format!(
                "Sales executive {} not found",
                salesman.sales_executive_id
            ))
        })?;
    let earned = commission(amount, exec.commission_rate);
    add_earnings(conn, "sales_executive", exec.id, exec.total_earnings, earned).await?;

    tracing::info!(
        salesman_id = salesman.id,
        sales_executive_id = exec.id,
        amount,
        "Referral commission credited"
    );
    Ok(())
}

async fn add_earnings(
    conn: &mut SqliteConnection,
    table: &str,
    id: i64,
    current: f64,
    earned: rust_decimal::Decimal,
) -> RepoResult<()> {
    let total = to_f64(to_decimal(current) + earned);
    sqlx::query(&format!(
        "UPDATE {table} SET total_earnings = ?, updated_at = ? WHERE id = ?"
    ))
    .bind(total)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::models::UserRole;

    async fn team(pool: &SqlitePool) -> (SalesExecutive, Salesman) {
        let exec_user = test_support::user(pool, "9100000001", UserRole::SalesExecutive).await;
        let man_user = test_support::user(pool, "9100000002", UserRole::Salesman).await;
        let mut conn = pool.acquire().await.unwrap();
        let exec = create_executive(&mut conn, exec_user, "Pune", "SE-2030-ABCDEF", 0.02)
            .await
            .unwrap();
        let man = create_salesman(&mut conn, man_user, exec.id, "Pune", "SP-2030-123456", 0.05)
            .await
            .unwrap();
        (exec, man)
    }

    #[tokio::test]
    async fn test_referral_lookup_and_uniqueness() {
        let pool = test_support::pool().await;
        let (_, man) = team(&pool).await;

        let found = find_salesman_by_referral(&pool, "sp-2030-123456").await.unwrap().unwrap();
        assert_eq!(found.id, man.id);

        let mut conn = pool.acquire().await.unwrap();
        assert!(salesman_referral_taken(&mut conn, "SP-2030-123456").await.unwrap());
        assert!(!salesman_referral_taken(&mut conn, "SP-2030-000000").await.unwrap());
        assert!(executive_referral_taken(&mut conn, "SE-2030-ABCDEF").await.unwrap());
    }

    #[tokio::test]
    async fn test_listings_join_contact() {
        let pool = test_support::pool().await;
        let (exec, _) = team(&pool).await;

        let execs = list_executives_by_city(&pool, "pune").await.unwrap();
        assert_eq!(execs.len(), 1);
        assert_eq!(execs[0].user.phone, "9100000001");
        assert!(list_executives_by_city(&pool, "Delhi").await.unwrap().is_empty());

        let salesmen = list_salesmen(&pool, Some(exec.id)).await.unwrap();
        assert_eq!(salesmen.len(), 1);
        assert_eq!(salesmen[0].user.name, "User 9100000002");
        assert!(list_salesmen(&pool, Some(exec.id + 1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commission_credits_both_levels() {
        let pool = test_support::pool().await;
        let (exec, man) = team(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        credit_commission(&mut conn, man.id, 1000.0).await.unwrap();
        credit_commission(&mut conn, man.id, 999.0).await.unwrap();

        let man = find_salesman(&mut *conn, man.id).await.unwrap().unwrap();
        let exec = find_executive(&mut *conn, exec.id).await.unwrap().unwrap();
        assert_eq!(man.total_earnings, 99.95);
        assert_eq!(exec.total_earnings, 39.98);
    }
}
