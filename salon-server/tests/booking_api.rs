//! Cart checkout and the booking lifecycle over HTTP

mod common;

use common::{TestApp, error_code, future_date};
use http::StatusCode;
use salon_server::ErrorCode;
use serde_json::{Value, json};

fn cart(salon_id: i64, services: &[i64], time: &str) -> Value {
    let mut when = future_date();
    when["time"] = json!(time);
    json!({
        "salons": [{
            "salon_id": salon_id,
            "services": services,
            "booking_date_time": when
        }]
    })
}

struct Fixture {
    app: TestApp,
    admin: String,
    owner: String,
    salon_id: i64,
    haircut: i64,
    facial: i64,
}

async fn fixture() -> Fixture {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let (salon_id, owner) = app.subscribed_salon("9811100001", &admin).await;
    let category = app.category(&admin, "Hair").await;
    let haircut = app.service_item(&owner, category, "Haircut", 500.0, 60).await;
    let facial = app.service_item(&owner, category, "Facial", 1000.0, 30).await;
    Fixture {
        app,
        admin,
        owner,
        salon_id,
        haircut,
        facial,
    }
}

#[tokio::test]
async fn test_cart_booking_prices_and_slots() {
    let f = fixture().await;
    let customer = f.app.customer("9822200001").await;

    let (status, body) = f
        .app
        .post(
            "/api/bookings",
            Some(&customer),
            cart(f.salon_id, &[f.haircut, f.haircut, f.facial], "10:00"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let booking = &body["bookings"][0];
    assert_eq!(booking["start_time"], "10:00");
    // 2 x 60 + 30 minutes
    assert_eq!(booking["end_time"], "12:30");
    assert_eq!(booking["total_amount"], 2000.0);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["provider_name"], "Glow Studio");

    let (status, mine) = f.app.get("/api/bookings/mine", Some(&customer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_overlapping_slot_is_rejected() {
    let f = fixture().await;
    let first = f.app.customer("9822200011").await;
    let second = f.app.customer("9822200012").await;

    let (status, _) = f
        .app
        .post("/api/bookings", Some(&first), cart(f.salon_id, &[f.haircut], "10:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = f
        .app
        .post("/api/bookings", Some(&second), cart(f.salon_id, &[f.facial], "10:30"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::SlotUnavailable.code() as u64);

    // Back to back is fine
    let (status, _) = f
        .app
        .post("/api/bookings", Some(&second), cart(f.salon_id, &[f.facial], "11:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_carts() {
    let f = fixture().await;
    let customer = f.app.customer("9822200021").await;

    let (status, _) = f
        .app
        .post("/api/bookings", Some(&customer), json!({ "salons": [] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = f
        .app
        .post("/api/bookings", Some(&customer), cart(f.salon_id, &[424242], "10:00"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::InvalidServiceSelection.code() as u64);

    let (status, body) = f
        .app
        .post("/api/bookings", Some(&customer), cart(424242, &[f.haircut], "10:00"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), ErrorCode::SalonNotFound.code() as u64);

    let mut past = cart(f.salon_id, &[f.haircut], "10:00");
    past["salons"][0]["booking_date_time"] = json!({ "year": 2020, "month": 1, "day": 1, "time": "10:00" });
    let (status, _) = f.app.post("/api/bookings", Some(&customer), past).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 23:30 + 60 minutes runs past midnight
    let (status, _) = f
        .app
        .post("/api/bookings", Some(&customer), cart(f.salon_id, &[f.haircut], "11:30 PM"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Home service was never offered by this salon
    let mut home = cart(f.salon_id, &[f.haircut], "10:00");
    home["booking_type"] = json!("home_service");
    home["service_location"] = json!({ "address": "12 Lake View" });
    let (status, _) = f.app.post("/api/bookings", Some(&customer), home).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Only customers book
    let (status, _) = f
        .app
        .post("/api/bookings", Some(&f.owner), cart(f.salon_id, &[f.haircut], "10:00"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_status_lifecycle_and_rating() {
    let f = fixture().await;
    let customer = f.app.customer("9822200031").await;
    let (_, body) = f
        .app
        .post("/api/bookings", Some(&customer), cart(f.salon_id, &[f.haircut], "09:00"))
        .await;
    let id = body["bookings"][0]["id"].as_i64().unwrap();
    let status_uri = format!("/api/bookings/{id}/status");

    // Customers cannot drive the lifecycle
    let (status, _) = f
        .app
        .patch(&status_uri, Some(&customer), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = f
        .app
        .patch(&status_uri, Some(&f.owner), json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::InvalidStatusTransition.code() as u64);

    let (status, _) = f
        .app
        .post(&format!("/api/bookings/{id}/rating"), Some(&customer), json!({ "score": 5 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    for next in ["confirmed", "in_progress", "completed"] {
        let (status, body) = f
            .app
            .patch(&status_uri, Some(&f.owner), json!({ "status": next }))
            .await;
        assert_eq!(status, StatusCode::OK, "{next}: {body}");
        assert_eq!(body["status"], next);
    }

    let (status, _) = f
        .app
        .patch(&format!("/api/bookings/{id}/cancel"), Some(&customer), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let rating_uri = format!("/api/bookings/{id}/rating");
    let (status, _) = f
        .app
        .post(&rating_uri, Some(&customer), json!({ "score": 6 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = f
        .app
        .post(&rating_uri, Some(&customer), json!({ "score": 4, "feedback": "Neat" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating_score"], 4);

    let (status, body) = f
        .app
        .post(&rating_uri, Some(&customer), json!({ "score": 5 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::BookingAlreadyRated.code() as u64);
}

#[tokio::test]
async fn test_cancellation_frees_the_slot() {
    let f = fixture().await;
    let customer = f.app.customer("9822200041").await;
    let other = f.app.customer("9822200042").await;
    let (_, body) = f
        .app
        .post("/api/bookings", Some(&customer), cart(f.salon_id, &[f.haircut], "15:00"))
        .await;
    let id = body["bookings"][0]["id"].as_i64().unwrap();

    let (status, _) = f
        .app
        .patch(&format!("/api/bookings/{id}/cancel"), Some(&other), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = f
        .app
        .patch(
            &format!("/api/bookings/{id}/cancel"),
            Some(&customer),
            json!({ "reason": "Running late" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["cancellation_reason"], "Running late");

    let (status, _) = f
        .app
        .post("/api/bookings", Some(&other), cart(f.salon_id, &[f.haircut], "15:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_salon_booking_listing_and_admin_override() {
    let f = fixture().await;
    let customer = f.app.customer("9822200051").await;
    let (_, body) = f
        .app
        .post("/api/bookings", Some(&customer), cart(f.salon_id, &[f.facial], "13:00"))
        .await;
    let id = body["bookings"][0]["id"].as_i64().unwrap();
    let date = body["bookings"][0]["booking_date"].as_str().unwrap().to_string();

    let (status, list) = f
        .app
        .get(&format!("/api/bookings/salon?date={date}&status=pending"), Some(&f.owner))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["customer_phone"], "9822200051");

    let (status, list) = f
        .app
        .get("/api/bookings/salon?status=completed", Some(&f.owner))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(0));

    let (status, _) = f
        .app
        .get("/api/bookings/salon?date=tomorrow", Some(&f.owner))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = f
        .app
        .patch(
            &format!("/api/bookings/{id}/status"),
            Some(&f.admin),
            json!({ "status": "confirmed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");
}
