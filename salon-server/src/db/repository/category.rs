//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryGender, CategoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM category WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

/// Active categories, optionally for one gender
pub async fn find_active(
    pool: &SqlitePool,
    gender: Option<CategoryGender>,
) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT * FROM category WHERE is_active = 1 AND (?1 IS NULL OR gender = ?1) ORDER BY name",
    )
    .bind(gender)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM category ORDER BY name, gender")
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

/// Case-insensitive (name, gender) lookup, ignoring `exclude_id`
pub async fn name_taken(
    pool: &SqlitePool,
    name: &str,
    gender: CategoryGender,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM category WHERE name = ?1 COLLATE NOCASE AND gender = ?2 \
         AND (?3 IS NULL OR id != ?3)",
    )
    .bind(name)
    .bind(gender)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: &CategoryCreate) -> RepoResult<Category> {
    let now = now_millis();
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO category (id, name, gender, icon, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.gender)
    .bind(&data.icon)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(category)
}

pub async fn update(pool: &SqlitePool, id: i64, data: &CategoryUpdate) -> RepoResult<Category> {
    sqlx::query_as::<_, Category>(
        "UPDATE category SET name = COALESCE(?1, name), gender = COALESCE(?2, gender), \
         icon = COALESCE(?3, icon), is_active = COALESCE(?4, is_active), updated_at = ?5 \
         WHERE id = ?6 RETURNING *",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.gender)
    .bind(&data.icon)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn hair(gender: CategoryGender) -> CategoryCreate {
        CategoryCreate {
            name: "Hair".into(),
            gender,
            icon: None,
        }
    }

    #[tokio::test]
    async fn test_name_is_unique_per_gender_ignoring_case() {
        let pool = test_support::pool().await;
        let men = create(&pool, &hair(CategoryGender::Men)).await.unwrap();
        create(&pool, &hair(CategoryGender::Women)).await.unwrap();

        assert!(name_taken(&pool, "HAIR", CategoryGender::Men, None).await.unwrap());
        assert!(!name_taken(&pool, "hair", CategoryGender::Men, Some(men.id)).await.unwrap());
        assert!(!name_taken(&pool, "Nails", CategoryGender::Men, None).await.unwrap());

        let dup = CategoryCreate {
            name: "hAiR".into(),
            gender: CategoryGender::Men,
            icon: None,
        };
        assert!(matches!(create(&pool, &dup).await, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_inactive_categories_are_hidden() {
        let pool = test_support::pool().await;
        let men = create(&pool, &hair(CategoryGender::Men)).await.unwrap();
        create(&pool, &hair(CategoryGender::Women)).await.unwrap();

        update(
            &pool,
            men.id,
            &CategoryUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(find_active(&pool, None).await.unwrap().len(), 1);
        assert!(find_active(&pool, Some(CategoryGender::Men))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(find_all(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_category() {
        let pool = test_support::pool().await;
        assert!(find_by_id(&pool, 1).await.unwrap().is_none());
        assert!(matches!(delete(&pool, 1).await, Err(RepoError::NotFound(_))));
    }
}
