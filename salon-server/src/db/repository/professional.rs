//! Independent Professional Repository

use super::{RepoError, RepoResult};
use crate::geo::BoundingBox;
use shared::models::{Gender, IndependentProfessional, ProfessionalCard, ProfessionalCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::types::Json;
use sqlx::{Sqlite, SqlitePool};

/// Default travel radius when onboarding omits it
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

const CARD_SELECT: &str = "SELECT p.*, u.name FROM independent_professional p \
     JOIN user u ON u.id = p.user_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<IndependentProfessional>> {
    let pro = sqlx::query_as::<_, IndependentProfessional>(
        "SELECT * FROM independent_professional WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(pro)
}

pub async fn find_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Option<IndependentProfessional>> {
    let pro = sqlx::query_as::<_, IndependentProfessional>(
        "SELECT * FROM independent_professional WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(pro)
}

pub async fn create(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    user_id: i64,
    data: &ProfessionalCreate,
    referred_by: Option<i64>,
) -> RepoResult<IndependentProfessional> {
    let now = now_millis();
    let location = &data.location;
    let gov = &data.government_id;
    let pro = sqlx::query_as::<_, IndependentProfessional>(
        "INSERT INTO independent_professional (id, user_id, gender, experience_years, service_types, \
         specializations, profile_photo, work_photos, latitude, longitude, address, city, state, \
         pincode, radius_km, availability, gov_id_type, gov_id_number, gov_id_image_url, \
         referred_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(user_id)
    .bind(data.gender)
    .bind(data.experience_years)
    .bind(Json(&data.service_types))
    .bind(Json(&data.specializations))
    .bind(&data.profile_photo)
    .bind(Json(&data.work_photos))
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(&location.address)
    .bind(&location.city)
    .bind(&location.state)
    .bind(&location.pincode)
    .bind(data.radius_km.unwrap_or(DEFAULT_RADIUS_KM))
    .bind(Json(&data.availability))
    .bind(gov.id_type)
    .bind(gov.id_number.trim())
    .bind(&gov.id_image_url)
    .bind(referred_by)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(pro)
}

/// Professional joined with the account name
pub async fn find_card(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProfessionalCard>> {
    let card = sqlx::query_as::<_, ProfessionalCard>(&format!("{CARD_SELECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(card)
}

/// Newest verified professionals, optionally of one gender
pub async fn home(
    pool: &SqlitePool,
    gender: Option<Gender>,
    limit: i64,
) -> RepoResult<Vec<ProfessionalCard>> {
    let cards = sqlx::query_as::<_, ProfessionalCard>(&format!(
        "{CARD_SELECT} WHERE p.verified_by_admin = 1 AND (?1 IS NULL OR p.gender = ?1) \
         ORDER BY p.created_at DESC, p.id DESC LIMIT ?2"
    ))
    .bind(gender)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(cards)
}

/// Verified professionals inside a bounding box
pub async fn find_verified_in_box(
    pool: &SqlitePool,
    bounds: &BoundingBox,
) -> RepoResult<Vec<ProfessionalCard>> {
    let cards = sqlx::query_as::<_, ProfessionalCard>(&format!(
        "{CARD_SELECT} WHERE p.verified_by_admin = 1 \
         AND p.latitude BETWEEN ?1 AND ?2 \
         AND ((?5 = 0 AND p.longitude BETWEEN ?3 AND ?4) OR (?5 = 1 AND (p.longitude >= ?3 OR p.longitude <= ?4)))"
    ))
    .bind(bounds.min_lat)
    .bind(bounds.max_lat)
    .bind(bounds.min_lon)
    .bind(bounds.max_lon)
    .bind(bounds.wraps_antimeridian())
    .fetch_all(pool)
    .await?;
    Ok(cards)
}

pub async fn list_unverified(pool: &SqlitePool) -> RepoResult<Vec<ProfessionalCard>> {
    let cards = sqlx::query_as::<_, ProfessionalCard>(&format!(
        "{CARD_SELECT} WHERE p.verified_by_admin = 0 ORDER BY p.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(cards)
}

pub async fn set_verified(pool: &SqlitePool, id: i64) -> RepoResult<IndependentProfessional> {
    sqlx::query_as::<_, IndependentProfessional>(
        "UPDATE independent_professional SET verified_by_admin = 1, updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Professional {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::models::{GovIdType, GovernmentIdInput, LocationInput, UserRole};

    fn pro_create(gender: Gender, lat: f64, lon: f64) -> ProfessionalCreate {
        ProfessionalCreate {
            gender,
            experience_years: 4,
            service_types: vec!["bridal".into()],
            specializations: vec![],
            profile_photo: None,
            work_photos: vec![],
            location: LocationInput {
                latitude: lat,
                longitude: lon,
                address: None,
                city: None,
                state: None,
                pincode: None,
            },
            radius_km: None,
            availability: vec![],
            government_id: GovernmentIdInput {
                id_type: GovIdType::Aadhar,
                id_number: "1234 5678 9012".into(),
                id_image_url: None,
            },
        }
    }

    async fn verified_pro(pool: &SqlitePool, phone: &str, gender: Gender) -> i64 {
        let user = test_support::user(pool, phone, UserRole::IndependentPro).await;
        let pro = create(pool, user, &pro_create(gender, 12.97, 77.59), None)
            .await
            .unwrap();
        set_verified(pool, pro.id).await.unwrap().id
    }

    #[tokio::test]
    async fn test_create_defaults_radius_and_joins_name() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "9000000001", UserRole::IndependentPro).await;
        let pro = create(&pool, user, &pro_create(Gender::Female, 12.97, 77.59), None)
            .await
            .unwrap();
        assert_eq!(pro.radius_km, DEFAULT_RADIUS_KM);

        let card = find_card(&pool, pro.id).await.unwrap().unwrap();
        assert_eq!(card.name, "User 9000000001");
        assert_eq!(card.professional.service_types, vec!["bridal".to_string()]);
        assert_eq!(find_by_user(&pool, user).await.unwrap().unwrap().id, pro.id);
    }

    #[tokio::test]
    async fn test_home_filters_gender_and_verification() {
        let pool = test_support::pool().await;
        verified_pro(&pool, "9000000001", Gender::Female).await;
        verified_pro(&pool, "9000000002", Gender::Male).await;
        let user = test_support::user(&pool, "9000000003", UserRole::IndependentPro).await;
        create(&pool, user, &pro_create(Gender::Female, 12.97, 77.59), None)
            .await
            .unwrap();

        assert_eq!(home(&pool, None, 5).await.unwrap().len(), 2);
        let women = home(&pool, Some(Gender::Female), 5).await.unwrap();
        assert_eq!(women.len(), 1);
        assert_eq!(women[0].professional.gender, Gender::Female);
        assert_eq!(list_unverified(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_verified_missing() {
        let pool = test_support::pool().await;
        assert!(matches!(
            set_verified(&pool, 7).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
