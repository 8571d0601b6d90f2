//! State / City Repository

use super::RepoResult;
use shared::models::{City, CityCreate, State, StateCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Country used when a state omits one
pub const DEFAULT_COUNTRY: &str = "India";

pub async fn find_states(pool: &SqlitePool) -> RepoResult<Vec<State>> {
    let states = sqlx::query_as::<_, State>("SELECT * FROM state ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(states)
}

pub async fn find_state(pool: &SqlitePool, id: i64) -> RepoResult<Option<State>> {
    let state = sqlx::query_as::<_, State>("SELECT * FROM state WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(state)
}

pub async fn create_state(pool: &SqlitePool, data: &StateCreate) -> RepoResult<State> {
    let state = sqlx::query_as::<_, State>(
        "INSERT INTO state (id, name, country, code, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.country.as_deref().map(str::trim).unwrap_or(DEFAULT_COUNTRY))
    .bind(&data.code)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(state)
}

pub async fn find_cities(pool: &SqlitePool, state_id: Option<i64>) -> RepoResult<Vec<City>> {
    let cities = sqlx::query_as::<_, City>(
        "SELECT * FROM city WHERE (?1 IS NULL OR state_id = ?1) ORDER BY name",
    )
    .bind(state_id)
    .fetch_all(pool)
    .await?;
    Ok(cities)
}

/// Cities inherit the country of their state
pub async fn create_city(pool: &SqlitePool, state: &State, data: &CityCreate) -> RepoResult<City> {
    let city = sqlx::query_as::<_, City>(
        "INSERT INTO city (id, name, state_id, country, pincode, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(state.id)
    .bind(&state.country)
    .bind(&data.pincode)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{RepoError, test_support};

    fn state(name: &str) -> StateCreate {
        StateCreate {
            name: name.into(),
            country: None,
            code: Some("KA".into()),
        }
    }

    fn city(name: &str, state_id: i64) -> CityCreate {
        CityCreate {
            name: name.into(),
            state_id,
            pincode: None,
        }
    }

    #[tokio::test]
    async fn test_state_names_unique_ignoring_case() {
        let pool = test_support::pool().await;
        let created = create_state(&pool, &state("Karnataka")).await.unwrap();
        assert_eq!(created.country, DEFAULT_COUNTRY);
        assert!(matches!(
            create_state(&pool, &state("KARNATAKA")).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_city_names_unique_within_state() {
        let pool = test_support::pool().await;
        let ka = create_state(&pool, &state("Karnataka")).await.unwrap();
        let kl = create_state(&pool, &state("Kerala")).await.unwrap();

        create_city(&pool, &ka, &city("Mysuru", ka.id)).await.unwrap();
        create_city(&pool, &kl, &city("Mysuru", kl.id)).await.unwrap();
        assert!(matches!(
            create_city(&pool, &ka, &city("mysuru", ka.id)).await,
            Err(RepoError::Duplicate(_))
        ));

        assert_eq!(find_cities(&pool, None).await.unwrap().len(), 2);
        assert_eq!(find_cities(&pool, Some(ka.id)).await.unwrap().len(), 1);
        let states = find_states(&pool).await.unwrap();
        assert_eq!(states[0].name, "Karnataka");
    }
}
