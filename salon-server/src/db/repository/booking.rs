//! Booking Repository
//!
//! Slot columns hold zero-padded `HH:MM` labels, so string comparison
//! orders them the same way as the times they encode.

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use shared::models::{
    Booking, BookingAddonLine, BookingDetail, BookingServiceLine, BookingStatus, BookingType,
    PaymentMethod, PaymentStatus, ProviderKind,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

/// Row of a new booking, lines excluded
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i64,
    pub provider_type: ProviderKind,
    pub provider_id: i64,
    pub specialist_id: Option<i64>,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_mins: i64,
    pub booking_type: BookingType,
    pub service_address: Option<String>,
    pub service_latitude: Option<f64>,
    pub service_longitude: Option<f64>,
    pub subtotal_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub offer_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewServiceLine {
    pub service_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub duration_mins: i64,
}

#[derive(Debug, Clone)]
pub struct NewAddonLine {
    pub addon_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, FromRow)]
struct BookingRow {
    #[sqlx(flatten)]
    booking: Booking,
    provider_name: Option<String>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
}

const PROVIDER_NAME: &str = "CASE b.provider_type \
     WHEN 'salon' THEN (SELECT s.shop_name FROM salon s WHERE s.id = b.provider_id) \
     ELSE (SELECT u.name FROM independent_professional p JOIN user u ON u.id = p.user_id \
           WHERE p.id = b.provider_id) END";

/// Take the database write lock before any read in this transaction
///
/// A deferred transaction that reads first cannot wait for the lock on its
/// first write; taking it up front lets concurrent carts queue behind
/// `busy_timeout` instead.
pub async fn lock_for_write(conn: &mut SqliteConnection) -> RepoResult<()> {
    sqlx::query("UPDATE booking SET updated_at = updated_at WHERE 0")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Is `[start, end)` on `date` already held for this provider?
///
/// A missing specialist on either side means the whole salon, so it
/// collides with every booking; two named specialists only with themselves.
pub async fn has_conflict(
    conn: &mut SqliteConnection,
    provider_type: ProviderKind,
    provider_id: i64,
    specialist_id: Option<i64>,
    date: &str,
    start: &str,
    end: &str,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM booking \
         WHERE provider_type = ?1 AND provider_id = ?2 AND booking_date = ?3 \
         AND status IN ('pending', 'confirmed', 'in_progress') \
         AND start_time < ?5 AND ?4 < end_time \
         AND (?6 IS NULL OR specialist_id IS NULL OR specialist_id = ?6)",
    )
    .bind(provider_type)
    .bind(provider_id)
    .bind(date)
    .bind(start)
    .bind(end)
    .bind(specialist_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count > 0)
}

/// Insert a booking with its lines on an open transaction
pub async fn insert(
    conn: &mut SqliteConnection,
    data: &NewBooking,
    services: &[NewServiceLine],
    addons: &[NewAddonLine],
) -> RepoResult<(Booking, Vec<BookingServiceLine>, Vec<BookingAddonLine>)> {
    let now = now_millis();
    let booking = sqlx::query_as::<_, Booking>(
        "INSERT INTO booking (id, customer_id, provider_type, provider_id, specialist_id, \
         booking_date, start_time, end_time, duration_mins, booking_type, service_address, \
         service_latitude, service_longitude, subtotal_amount, discount_amount, total_amount, \
         offer_id, payment_status, payment_method, status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.customer_id)
    .bind(data.provider_type)
    .bind(data.provider_id)
    .bind(data.specialist_id)
    .bind(&data.booking_date)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(data.duration_mins)
    .bind(data.booking_type)
    .bind(&data.service_address)
    .bind(data.service_latitude)
    .bind(data.service_longitude)
    .bind(data.subtotal_amount)
    .bind(data.discount_amount)
    .bind(data.total_amount)
    .bind(data.offer_id)
    .bind(PaymentStatus::Pending)
    .bind(data.payment_method)
    .bind(BookingStatus::Pending)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    let mut service_lines = Vec::with_capacity(services.len());
    for line in services {
        let saved = sqlx::query_as::<_, BookingServiceLine>(
            "INSERT INTO booking_service (booking_id, service_item_id, name, quantity, unit_price, \
             discount_percent, duration_mins) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(booking.id)
        .bind(line.service_item_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.discount_percent)
        .bind(line.duration_mins)
        .fetch_one(&mut *conn)
        .await?;
        service_lines.push(saved);
    }

    let mut addon_lines = Vec::with_capacity(addons.len());
    for line in addons {
        let saved = sqlx::query_as::<_, BookingAddonLine>(
            "INSERT INTO booking_addon (booking_id, addon_id, name, quantity, unit_price) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(booking.id)
        .bind(line.addon_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_price)
        .fetch_one(&mut *conn)
        .await?;
        addon_lines.push(saved);
    }

    Ok((booking, service_lines, addon_lines))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM booking WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

/// Customer history with provider names, newest first
pub async fn find_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<BookingDetail>> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT b.*, {PROVIDER_NAME} AS provider_name, \
         NULL AS customer_name, NULL AS customer_phone \
         FROM booking b WHERE b.customer_id = ? \
         ORDER BY b.created_at DESC, b.id DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    attach_lines(pool, rows).await
}

/// Provider agenda with customer contact, newest first
pub async fn find_for_provider(
    pool: &SqlitePool,
    provider_type: ProviderKind,
    provider_id: i64,
    date: Option<&str>,
    status: Option<BookingStatus>,
) -> RepoResult<Vec<BookingDetail>> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT b.*, {PROVIDER_NAME} AS provider_name, \
         u.name AS customer_name, u.phone AS customer_phone \
         FROM booking b JOIN user u ON u.id = b.customer_id \
         WHERE b.provider_type = ?1 AND b.provider_id = ?2 \
         AND (?3 IS NULL OR b.booking_date = ?3) AND (?4 IS NULL OR b.status = ?4) \
         ORDER BY b.created_at DESC, b.id DESC"
    ))
    .bind(provider_type)
    .bind(provider_id)
    .bind(date)
    .bind(status)
    .fetch_all(pool)
    .await?;
    attach_lines(pool, rows).await
}

async fn attach_lines(pool: &SqlitePool, rows: Vec<BookingRow>) -> RepoResult<Vec<BookingDetail>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|r| r.booking.id).collect();
    let placeholders = vec!["?"; ids.len()].join(", ");

    let service_sql =
        format!("SELECT * FROM booking_service WHERE booking_id IN ({placeholders}) ORDER BY id");
    let mut query = sqlx::query_as::<_, BookingServiceLine>(&service_sql);
    for id in &ids {
        query = query.bind(*id);
    }
    let mut services: HashMap<i64, Vec<BookingServiceLine>> = HashMap::new();
    for line in query.fetch_all(pool).await? {
        services.entry(line.booking_id).or_default().push(line);
    }

    let addon_sql =
        format!("SELECT * FROM booking_addon WHERE booking_id IN ({placeholders}) ORDER BY id");
    let mut query = sqlx::query_as::<_, BookingAddonLine>(&addon_sql);
    for id in &ids {
        query = query.bind(*id);
    }
    let mut addons: HashMap<i64, Vec<BookingAddonLine>> = HashMap::new();
    for line in query.fetch_all(pool).await? {
        addons.entry(line.booking_id).or_default().push(line);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.booking.id;
            BookingDetail {
                booking: row.booking,
                provider_name: row.provider_name,
                customer_name: row.customer_name,
                customer_phone: row.customer_phone,
                services: services.remove(&id).unwrap_or_default(),
                addons: addons.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

/// Move a booking from `from` to `to`
///
/// Guarded on the current status so a concurrent change is reported as
/// `Validation` instead of being overwritten.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: BookingStatus,
    to: BookingStatus,
) -> RepoResult<Booking> {
    sqlx::query_as::<_, Booking>(
        "UPDATE booking SET status = ?, updated_at = ? WHERE id = ? AND status = ? RETURNING *",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .bind(from)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::Validation(format!("Booking {id} is no longer {}", from.as_str())))
}

pub async fn cancel(pool: &SqlitePool, id: i64, reason: Option<&str>) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE booking SET status = 'cancelled', cancellation_reason = ?, updated_at = ? \
         WHERE id = ? AND status IN ('pending', 'confirmed') RETURNING *",
    )
    .bind(reason)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(booking)
}

/// Record a rating on a completed, unrated booking
pub async fn rate(
    pool: &SqlitePool,
    id: i64,
    score: i64,
    feedback: Option<&str>,
) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE booking SET rating_score = ?, rating_feedback = ?, updated_at = ? \
         WHERE id = ? AND status = 'completed' AND rating_score IS NULL RETURNING *",
    )
    .bind(score)
    .bind(feedback)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(booking)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::models::UserRole;

    pub(crate) fn new_booking(
        customer_id: i64,
        salon_id: i64,
        specialist_id: Option<i64>,
        start: &str,
        end: &str,
    ) -> NewBooking {
        NewBooking {
            customer_id,
            provider_type: ProviderKind::Salon,
            provider_id: salon_id,
            specialist_id,
            booking_date: "2030-01-05".into(),
            start_time: start.into(),
            end_time: end.into(),
            duration_mins: 60,
            booking_type: BookingType::InSalon,
            service_address: None,
            service_latitude: None,
            service_longitude: None,
            subtotal_amount: 100.0,
            discount_amount: 0.0,
            total_amount: 100.0,
            offer_id: None,
            payment_method: PaymentMethod::Cash,
            notes: None,
        }
    }

    async fn conflict(
        pool: &SqlitePool,
        salon_id: i64,
        specialist: Option<i64>,
        start: &str,
        end: &str,
    ) -> bool {
        let mut conn = pool.acquire().await.unwrap();
        has_conflict(
            &mut conn,
            ProviderKind::Salon,
            salon_id,
            specialist,
            "2030-01-05",
            start,
            end,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_overlap_detection() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &new_booking(customer, salon.id, None, "10:00", "11:00"), &[], &[])
            .await
            .unwrap();
        drop(conn);

        assert!(conflict(&pool, salon.id, None, "10:30", "11:30").await);
        assert!(conflict(&pool, salon.id, None, "09:00", "12:00").await);
        assert!(!conflict(&pool, salon.id, None, "11:00", "12:00").await);
        assert!(!conflict(&pool, salon.id, None, "09:00", "10:00").await);
    }

    #[tokio::test]
    async fn test_specialist_scoped_conflicts() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let a = sqlx::query_scalar::<_, i64>(
            "INSERT INTO specialist (id, salon_id, name, created_at, updated_at) VALUES (1, ?, 'A', 0, 0) RETURNING id",
        )
        .bind(salon.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &new_booking(customer, salon.id, Some(a), "10:00", "11:00"), &[], &[])
            .await
            .unwrap();
        drop(conn);

        assert!(conflict(&pool, salon.id, Some(a), "10:15", "10:45").await);
        assert!(!conflict(&pool, salon.id, Some(a + 1), "10:15", "10:45").await);
        assert!(conflict(&pool, salon.id, None, "10:15", "10:45").await);
    }

    #[tokio::test]
    async fn test_cancelled_bookings_release_the_slot() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let mut conn = pool.acquire().await.unwrap();
        let (booking, _, _) =
            insert(&mut conn, &new_booking(customer, salon.id, None, "10:00", "11:00"), &[], &[])
                .await
                .unwrap();
        drop(conn);

        let cancelled = cancel(&pool, booking.id, Some("changed plans")).await.unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(!conflict(&pool, salon.id, None, "10:00", "11:00").await);
        assert!(cancel(&pool, booking.id, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listings_join_names_and_lines() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let mut conn = pool.acquire().await.unwrap();
        insert(
            &mut conn,
            &new_booking(customer, salon.id, None, "10:00", "11:00"),
            &[NewServiceLine {
                service_item_id: 7,
                name: "Haircut".into(),
                quantity: 2,
                unit_price: 50.0,
                discount_percent: 0.0,
                duration_mins: 30,
            }],
            &[NewAddonLine {
                addon_id: 8,
                name: "Wash".into(),
                quantity: 1,
                unit_price: 20.0,
            }],
        )
        .await
        .unwrap();
        drop(conn);

        let mine = find_for_customer(&pool, customer).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].provider_name.as_deref(), Some("Glow Studio"));
        assert_eq!(mine[0].services[0].quantity, 2);
        assert_eq!(mine[0].addons.len(), 1);
        assert!(mine[0].customer_name.is_none());

        let agenda = find_for_provider(&pool, ProviderKind::Salon, salon.id, Some("2030-01-05"), None)
            .await
            .unwrap();
        assert_eq!(agenda[0].customer_phone.as_deref(), Some("9000000002"));
        let other_day = find_for_provider(&pool, ProviderKind::Salon, salon.id, Some("2030-01-06"), None)
            .await
            .unwrap();
        assert!(other_day.is_empty());
    }

    #[tokio::test]
    async fn test_status_and_rating_guards() {
        let pool = test_support::pool().await;
        let salon = test_support::verified_salon(&pool, "9000000001").await;
        let customer = test_support::user(&pool, "9000000002", UserRole::Customer).await;
        let mut conn = pool.acquire().await.unwrap();
        let (booking, _, _) =
            insert(&mut conn, &new_booking(customer, salon.id, None, "10:00", "11:00"), &[], &[])
                .await
                .unwrap();
        drop(conn);

        assert!(rate(&pool, booking.id, 5, None).await.unwrap().is_none());

        update_status(&pool, booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert!(matches!(
            update_status(&pool, booking.id, BookingStatus::Pending, BookingStatus::Confirmed).await,
            Err(RepoError::Validation(_))
        ));
        update_status(&pool, booking.id, BookingStatus::Confirmed, BookingStatus::InProgress)
            .await
            .unwrap();
        update_status(&pool, booking.id, BookingStatus::InProgress, BookingStatus::Completed)
            .await
            .unwrap();

        let rated = rate(&pool, booking.id, 5, Some("great")).await.unwrap().unwrap();
        assert_eq!(rated.rating_score, Some(5));
        assert!(rate(&pool, booking.id, 4, None).await.unwrap().is_none());
    }
}
