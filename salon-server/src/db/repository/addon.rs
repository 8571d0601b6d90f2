//! Add-on Repository

use super::{RepoError, RepoResult};
use shared::models::{AddOn, AddOnCreate, AddOnUpdate, ProviderKind};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_provider(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
) -> RepoResult<Vec<AddOn>> {
    let addons = sqlx::query_as::<_, AddOn>(
        "SELECT * FROM addon WHERE provider_type = ? AND provider_id = ? \
         ORDER BY is_recommended DESC, name",
    )
    .bind(kind)
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(addons)
}

pub async fn find_many_owned(
    conn: &mut sqlx::SqliteConnection,
    kind: ProviderKind,
    provider_id: i64,
    ids: &[i64],
) -> RepoResult<Vec<AddOn>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT * FROM addon WHERE provider_type = ? AND provider_id = ? AND id IN ({placeholders})"
    );
    let mut query = sqlx::query_as::<_, AddOn>(&sql).bind(kind).bind(provider_id);
    for id in ids {
        query = query.bind(*id);
    }
    let addons = query.fetch_all(&mut *conn).await?;
    Ok(addons)
}

pub async fn create(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    data: &AddOnCreate,
) -> RepoResult<AddOn> {
    let now = now_millis();
    let addon = sqlx::query_as::<_, AddOn>(
        "INSERT INTO addon (id, name, price, duration_mins, image_url, is_recommended, \
         provider_type, provider_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.duration_mins.unwrap_or(0))
    .bind(&data.image_url)
    .bind(data.is_recommended.unwrap_or(false))
    .bind(kind)
    .bind(provider_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(addon)
}

pub async fn update(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    id: i64,
    data: &AddOnUpdate,
) -> RepoResult<AddOn> {
    sqlx::query_as::<_, AddOn>(
        "UPDATE addon SET name = COALESCE(?1, name), price = COALESCE(?2, price), \
         duration_mins = COALESCE(?3, duration_mins), image_url = COALESCE(?4, image_url), \
         is_recommended = COALESCE(?5, is_recommended), updated_at = ?6 \
         WHERE id = ?7 AND provider_type = ?8 AND provider_id = ?9 RETURNING *",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.price)
    .bind(data.duration_mins)
    .bind(&data.image_url)
    .bind(data.is_recommended)
    .bind(now_millis())
    .bind(id)
    .bind(kind)
    .bind(provider_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Add-on {id} not found")))
}

pub async fn delete(
    pool: &SqlitePool,
    kind: ProviderKind,
    provider_id: i64,
    id: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM addon WHERE id = ? AND provider_type = ? AND provider_id = ?")
        .bind(id)
        .bind(kind)
        .bind(provider_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Add-on {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_addon_crud_is_scoped() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let other = test_support::verified_salon(&pool, "9000000002").await;

        let addon = create(
            &pool,
            ProviderKind::Salon,
            salon.id,
            &AddOnCreate {
                name: " Head massage ".into(),
                price: 150.0,
                duration_mins: Some(10),
                image_url: None,
                is_recommended: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(addon.name, "Head massage");

        let listed = find_by_provider(&pool, ProviderKind::Salon, salon.id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(find_by_provider(&pool, ProviderKind::Salon, other.id)
            .await
            .unwrap()
            .is_empty());

        let updated = update(
            &pool,
            ProviderKind::Salon,
            salon.id,
            addon.id,
            &AddOnUpdate {
                price: Some(200.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 200.0);
        assert_eq!(updated.duration_mins, 10);

        assert!(matches!(
            delete(&pool, ProviderKind::Salon, other.id, addon.id).await,
            Err(RepoError::NotFound(_))
        ));
        delete(&pool, ProviderKind::Salon, salon.id, addon.id)
            .await
            .unwrap();
    }
}
