//! Specialist Repository

use super::{RepoError, RepoResult};
use shared::models::{Specialist, SpecialistCreate, SpecialistUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::types::Json;
use sqlx::SqlitePool;

pub async fn find_by_salon(pool: &SqlitePool, salon_id: i64) -> RepoResult<Vec<Specialist>> {
    let specialists = sqlx::query_as::<_, Specialist>(
        "SELECT * FROM specialist WHERE salon_id = ? ORDER BY name",
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;
    Ok(specialists)
}

pub async fn find_owned(
    conn: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
    salon_id: i64,
    id: i64,
) -> RepoResult<Option<Specialist>> {
    let specialist =
        sqlx::query_as::<_, Specialist>("SELECT * FROM specialist WHERE id = ? AND salon_id = ?")
            .bind(id)
            .bind(salon_id)
            .fetch_optional(conn)
            .await?;
    Ok(specialist)
}

pub async fn create(
    pool: &SqlitePool,
    salon_id: i64,
    data: &SpecialistCreate,
) -> RepoResult<Specialist> {
    let now = now_millis();
    let specialist = sqlx::query_as::<_, Specialist>(
        "INSERT INTO specialist (id, salon_id, name, contact_number, expertise, experience_years, \
         image_url, certifications, availability, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(salon_id)
    .bind(data.name.trim())
    .bind(&data.contact_number)
    .bind(Json(&data.expertise))
    .bind(data.experience_years.unwrap_or(0))
    .bind(&data.image_url)
    .bind(Json(&data.certifications))
    .bind(Json(&data.availability))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(specialist)
}

pub async fn update(
    pool: &SqlitePool,
    salon_id: i64,
    id: i64,
    data: &SpecialistUpdate,
) -> RepoResult<Specialist> {
    sqlx::query_as::<_, Specialist>(
        "UPDATE specialist SET name = COALESCE(?1, name), contact_number = COALESCE(?2, contact_number), \
         expertise = COALESCE(?3, expertise), experience_years = COALESCE(?4, experience_years), \
         image_url = COALESCE(?5, image_url), certifications = COALESCE(?6, certifications), \
         availability = COALESCE(?7, availability), updated_at = ?8 \
         WHERE id = ?9 AND salon_id = ?10 RETURNING *",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.contact_number)
    .bind(data.expertise.as_ref().map(Json))
    .bind(data.experience_years)
    .bind(&data.image_url)
    .bind(data.certifications.as_ref().map(Json))
    .bind(data.availability.as_ref().map(Json))
    .bind(now_millis())
    .bind(id)
    .bind(salon_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Specialist {id} not found")))
}

pub async fn delete(pool: &SqlitePool, salon_id: i64, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM specialist WHERE id = ? AND salon_id = ?")
        .bind(id)
        .bind(salon_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Specialist {id} not found")));
    }
    Ok(())
}
