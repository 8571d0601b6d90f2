//! Subscription Repository
//!
//! Plans, provider subscription state, and referral commission credit.

use super::{RepoError, RepoResult, sales};
use shared::models::{ProviderKind, SubscriptionPlan, SubscriptionPlanCreate};
use shared::util::{DAY_MILLIS, now_millis, snowflake_id};
use sqlx::types::Json;
use sqlx::SqlitePool;

pub async fn find_plan(pool: &SqlitePool, id: i64) -> RepoResult<Option<SubscriptionPlan>> {
    let plan = sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plan WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(plan)
}

/// Plans ordered by price; `include_inactive` for administrators
pub async fn find_plans(pool: &SqlitePool, include_inactive: bool) -> RepoResult<Vec<SubscriptionPlan>> {
    let plans = sqlx::query_as::<_, SubscriptionPlan>(
        "SELECT * FROM subscription_plan WHERE (?1 = 1 OR is_active = 1) ORDER BY price, name",
    )
    .bind(include_inactive)
    .fetch_all(pool)
    .await?;
    Ok(plans)
}

pub async fn create_plan(pool: &SqlitePool, data: &SubscriptionPlanCreate) -> RepoResult<SubscriptionPlan> {
    let now = now_millis();
    let plan = sqlx::query_as::<_, SubscriptionPlan>(
        "INSERT INTO subscription_plan (id, name, price, duration_in_days, features, is_active, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.duration_in_days)
    .bind(Json(&data.features))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(plan)
}

fn provider_table(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Salon => "salon",
        ProviderKind::IndependentProfessional => "independent_professional",
    }
}

/// Activate `plan` for a provider starting at `now`
///
/// When the provider was referred, the salesman and their executive are
/// credited in the same transaction. Returns `(start, end)`.
pub async fn subscribe(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    plan: &SubscriptionPlan,
    now: i64,
) -> RepoResult<(i64, i64)> {
    let end = now + plan.duration_in_days * DAY_MILLIS;
    let mut tx = pool.begin().await?;

    let referred_by: Option<Option<i64>> = sqlx::query_scalar(&format!(
        "UPDATE {} SET subscription_plan_id = ?, subscription_start = ?, subscription_end = ?, \
         subscription_status = 'paid', updated_at = ? WHERE id = ? RETURNING referred_by",
        provider_table(kind)
    ))
    .bind(plan.id)
    .bind(now)
    .bind(end)
    .bind(now)
    .bind(provider_id)
    .fetch_optional(&mut *tx)
    .await?;

    let referred_by =
        referred_by.ok_or_else(|| RepoError::NotFound(format!("Provider {provider_id} not found")))?;

    if let Some(salesman_id) = referred_by {
        sales::credit_commission(&mut tx, salesman_id, plan.price).await?;
    }

    tx.commit().await?;
    Ok((now, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn plan(name: &str, price: f64) -> SubscriptionPlanCreate {
        SubscriptionPlanCreate {
            name: name.into(),
            price,
            duration_in_days: 30,
            features: vec!["Listing".into()],
        }
    }

    #[tokio::test]
    async fn test_plan_names_are_unique() {
        let pool = test_support::pool().await;
        create_plan(&pool, &plan("Gold", 999.0)).await.unwrap();
        assert!(matches!(
            create_plan(&pool, &plan("gold", 10.0)).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_inactive_plans_hidden_from_providers() {
        let pool = test_support::pool().await;
        create_plan(&pool, &plan("Silver", 499.0)).await.unwrap();
        let gold = create_plan(&pool, &plan("Gold", 999.0)).await.unwrap();
        sqlx::query("UPDATE subscription_plan SET is_active = 0 WHERE id = ?")
            .bind(gold.id)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(find_plans(&pool, false).await.unwrap().len(), 1);
        assert_eq!(find_plans(&pool, true).await.unwrap().len(), 2);
        assert!(find_plans(&pool, false).await.unwrap()[0].features.contains(&"Listing".to_string()));
    }

    #[tokio::test]
    async fn test_subscribe_sets_window() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let gold = create_plan(&pool, &plan("Gold", 999.0)).await.unwrap();

        let (start, end) = subscribe(&pool, ProviderKind::Salon, salon.id, &gold, 1_000)
            .await
            .unwrap();
        assert_eq!(start, 1_000);
        assert_eq!(end, 1_000 + 30 * DAY_MILLIS);

        let salon = super::super::salon::find_by_id(&pool, salon.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(salon.subscription_plan_id, Some(gold.id));
        assert_eq!(salon.subscription_status, shared::models::SubscriptionStatus::Paid);
    }

    #[tokio::test]
    async fn test_subscribe_unknown_provider() {
        let pool = test_support::pool().await;
        let gold = create_plan(&pool, &plan("Gold", 999.0)).await.unwrap();
        assert!(matches!(
            subscribe(&pool, ProviderKind::IndependentProfessional, 5, &gold, 0).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
