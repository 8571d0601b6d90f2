//! Review Repository

use super::RepoResult;
use shared::models::{Review, ReviewCreate, ReviewWithUser};
use shared::util::{now_millis, snowflake_id};
use sqlx::types::Json;
use sqlx::SqlitePool;

pub async fn create(pool: &SqlitePool, user_id: i64, data: &ReviewCreate) -> RepoResult<Review> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO review (id, salon_id, user_id, rating, comment, images, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.salon_id)
    .bind(user_id)
    .bind(data.rating)
    .bind(&data.comment)
    .bind(Json(&data.images))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(review)
}

/// Newest first, with the reviewer's name
pub async fn find_by_salon(pool: &SqlitePool, salon_id: i64) -> RepoResult<Vec<ReviewWithUser>> {
    let reviews = sqlx::query_as::<_, ReviewWithUser>(
        "SELECT r.*, u.name AS user_name FROM review r JOIN user u ON u.id = r.user_id \
         WHERE r.salon_id = ? ORDER BY r.created_at DESC, r.id DESC",
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::models::UserRole;

    #[tokio::test]
    async fn test_reviews_join_user_name() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;

        create(
            &pool,
            customer,
            &ReviewCreate {
                salon_id: salon.id,
                rating: 4,
                comment: Some("Lovely".into()),
                images: vec![],
            },
        )
        .await
        .unwrap();

        let reviews = find_by_salon(&pool, salon.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].user_name, "User 9000000002");
        assert_eq!(reviews[0].review.rating, 4);
    }

    #[tokio::test]
    async fn test_rating_outside_range_is_rejected_by_schema() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let result = create(
            &pool,
            customer,
            &ReviewCreate {
                salon_id: salon.id,
                rating: 6,
                comment: None,
                images: vec![],
            },
        )
        .await;
        assert!(result.is_err());
    }
}
