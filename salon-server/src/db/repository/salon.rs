//! Salon Repository

use super::{RepoError, RepoResult};
use crate::geo::BoundingBox;
use shared::models::{FeaturedSalon, Salon, SalonCategory, SalonCreate, SalonLocationUpdate};
use shared::request::PaginationQuery;
use shared::util::{now_millis, snowflake_id};
use sqlx::types::Json;
use sqlx::{Sqlite, SqlitePool};

pub async fn find_by_id(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Salon>> {
    let salon = sqlx::query_as::<_, Salon>("SELECT * FROM salon WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(salon)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Option<Salon>> {
    let salon = sqlx::query_as::<_, Salon>("SELECT * FROM salon WHERE owner_id = ?")
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(salon)
}

/// Insert a salon profile for `owner_id`
pub async fn create(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    owner_id: i64,
    data: &SalonCreate,
    referred_by: Option<i64>,
    onboarded_by: Option<i64>,
) -> RepoResult<Salon> {
    let now = now_millis();
    let location = &data.location;
    let gov = &data.government_id;
    let salon = sqlx::query_as::<_, Salon>(
        "INSERT INTO salon (id, owner_id, shop_type, partners, shop_name, about, contact_number, \
         whatsapp_number, salon_category, offers_home_service, number_of_staff, opening_date, \
         opening_hours, registration_number, latitude, longitude, address, city, state, pincode, \
         logo_url, cover_image_url, gallery_images, gov_id_type, gov_id_number, gov_id_image_url, \
         referred_by, onboarded_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING *",
    )
    .bind(snowflake_id())
    .bind(owner_id)
    .bind(data.shop_type)
    .bind(Json(&data.partners))
    .bind(data.shop_name.trim())
    .bind(&data.about)
    .bind(&data.contact_number)
    .bind(&data.whatsapp_number)
    .bind(data.salon_category)
    .bind(data.offers_home_service)
    .bind(data.number_of_staff)
    .bind(&data.opening_date)
    .bind(Json(&data.opening_hours))
    .bind(&data.registration_number)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(&location.address)
    .bind(&location.city)
    .bind(&location.state)
    .bind(&location.pincode)
    .bind(&data.logo_url)
    .bind(&data.cover_image_url)
    .bind(Json(&data.gallery_images))
    .bind(gov.id_type)
    .bind(gov.id_number.trim())
    .bind(&gov.id_image_url)
    .bind(referred_by)
    .bind(onboarded_by)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(salon)
}

/// Admin listing, newest first
pub async fn list(pool: &SqlitePool, page: &PaginationQuery) -> RepoResult<(Vec<Salon>, i64)> {
    let salons = sqlx::query_as::<_, Salon>(
        "SELECT * FROM salon ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(page.limit() as i64)
    .bind(page.offset() as i64)
    .fetch_all(pool)
    .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salon")
        .fetch_one(pool)
        .await?;
    Ok((salons, total))
}

pub async fn list_unverified(pool: &SqlitePool) -> RepoResult<Vec<Salon>> {
    let salons = sqlx::query_as::<_, Salon>(
        "SELECT * FROM salon WHERE verified_by_admin = 0 ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(salons)
}

pub async fn set_verified(pool: &SqlitePool, id: i64) -> RepoResult<Salon> {
    let rows =
        sqlx::query("UPDATE salon SET verified_by_admin = 1, updated_at = ? WHERE id = ?")
            .bind(now_millis())
            .bind(id)
            .execute(pool)
            .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Salon {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Salon {id} not found")))
}

/// Flip `offers_home_service`, returning the new value
pub async fn toggle_home_service(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let value: Option<bool> = sqlx::query_scalar(
        "UPDATE salon SET offers_home_service = NOT offers_home_service, updated_at = ? \
         WHERE id = ? RETURNING offers_home_service",
    )
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    value.ok_or_else(|| RepoError::NotFound(format!("Salon {id} not found")))
}

pub async fn update_location(
    pool: &SqlitePool,
    id: i64,
    latitude: f64,
    longitude: f64,
    data: &SalonLocationUpdate,
) -> RepoResult<Salon> {
    let rows = sqlx::query(
        "UPDATE salon SET latitude = ?1, longitude = ?2, address = COALESCE(?3, address), \
         city = COALESCE(?4, city), state = COALESCE(?5, state), pincode = COALESCE(?6, pincode), \
         updated_at = ?7 WHERE id = ?8",
    )
    .bind(latitude)
    .bind(longitude)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.pincode)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Salon {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Salon {id} not found")))
}

/// Verified salons inside a bounding box (proximity prefilter)
pub async fn find_verified_in_box(
    pool: &SqlitePool,
    bounds: &BoundingBox,
    category: Option<SalonCategory>,
) -> RepoResult<Vec<Salon>> {
    let salons = sqlx::query_as::<_, Salon>(
        "SELECT * FROM salon WHERE verified_by_admin = 1 \
         AND latitude BETWEEN ?1 AND ?2 \
         AND ((?5 = 0 AND longitude BETWEEN ?3 AND ?4) OR (?5 = 1 AND (longitude >= ?3 OR longitude <= ?4))) \
         AND (?6 IS NULL OR salon_category = ?6)",
    )
    .bind(bounds.min_lat)
    .bind(bounds.max_lat)
    .bind(bounds.min_lon)
    .bind(bounds.max_lon)
    .bind(bounds.wraps_antimeridian())
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(salons)
}

/// Verified salons ranked by review average, then review count
pub async fn featured(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<FeaturedSalon>> {
    let salons = sqlx::query_as::<_, FeaturedSalon>(
        "SELECT s.*, CAST(COALESCE(AVG(r.rating), 0) AS REAL) AS average_rating, \
         COUNT(r.id) AS total_reviews \
         FROM salon s LEFT JOIN review r ON r.salon_id = s.id \
         WHERE s.verified_by_admin = 1 \
         GROUP BY s.id \
         ORDER BY average_rating DESC, total_reviews DESC, s.created_at DESC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(salons)
}

pub async fn find_verified_by_category(
    pool: &SqlitePool,
    category: SalonCategory,
) -> RepoResult<Vec<Salon>> {
    let salons = sqlx::query_as::<_, Salon>(
        "SELECT * FROM salon WHERE verified_by_admin = 1 AND salon_category = ? \
         ORDER BY created_at DESC",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(salons)
}

/// Up to `limit` distinct category names used by a salon's active services
pub async fn service_category_names(
    pool: &SqlitePool,
    salon_id: i64,
    limit: i64,
) -> RepoResult<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT c.name FROM service_item si \
         JOIN category c ON c.id = si.category_id \
         WHERE si.provider_type = 'salon' AND si.provider_id = ? AND si.status = 'active' \
         ORDER BY c.name LIMIT ?",
    )
    .bind(salon_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// Salons onboarded through a salesman's referral id
pub async fn find_referred_by(pool: &SqlitePool, salesman_id: i64) -> RepoResult<Vec<Salon>> {
    let salons = sqlx::query_as::<_, Salon>(
        "SELECT * FROM salon WHERE referred_by = ? ORDER BY created_at DESC",
    )
    .bind(salesman_id)
    .fetch_all(pool)
    .await?;
    Ok(salons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{self, salon_create};
    use shared::models::UserRole;

    #[tokio::test]
    async fn test_create_round_trips_json_columns() {
        let pool = test_support::pool().await;
        let owner = test_support::user(&pool, "9000000001", UserRole::SalonOwner).await;
        let salon = create(&pool, owner, &salon_create(12.97, 77.59, SalonCategory::Unisex), None, None)
            .await
            .unwrap();

        let found = find_by_owner(&pool, owner).await.unwrap().unwrap();
        assert_eq!(found.id, salon.id);
        assert_eq!(found.gallery_images, vec!["a.jpg".to_string()]);
        assert!(!found.verified_by_admin);
    }

    #[tokio::test]
    async fn test_box_query_only_returns_verified() {
        let pool = test_support::pool().await;
        let a = test_support::user(&pool, "9000000001", UserRole::SalonOwner).await;
        let b = test_support::user(&pool, "9000000002", UserRole::SalonOwner).await;
        let verified = create(&pool, a, &salon_create(12.97, 77.59, SalonCategory::Men), None, None)
            .await
            .unwrap();
        create(&pool, b, &salon_create(12.971, 77.591, SalonCategory::Men), None, None)
            .await
            .unwrap();
        set_verified(&pool, verified.id).await.unwrap();

        let bounds = BoundingBox::around(12.97, 77.59, 5.0);
        let found = find_verified_in_box(&pool, &bounds, None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, verified.id);

        let spa = find_verified_in_box(&pool, &bounds, Some(SalonCategory::Spa))
            .await
            .unwrap();
        assert!(spa.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_home_service() {
        let pool = test_support::pool().await;
        let owner = test_support::user(&pool, "9000000001", UserRole::SalonOwner).await;
        let salon = create(&pool, owner, &salon_create(0.0, 0.0, SalonCategory::Spa), None, None)
            .await
            .unwrap();
        assert!(toggle_home_service(&pool, salon.id).await.unwrap());
        assert!(!toggle_home_service(&pool, salon.id).await.unwrap());
        assert!(matches!(
            toggle_home_service(&pool, 42).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
