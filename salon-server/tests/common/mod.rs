//! Shared harness for the HTTP integration tests
//!
//! Each test gets its own in-memory database and router. Requests go
//! through `tower::ServiceExt::oneshot`, so no socket is bound.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use salon_server::auth::JwtConfig;
use salon_server::core::build_router;
use salon_server::db::DbService;
use salon_server::db::repository::user as user_repo;
use salon_server::{Config, ServerState};
use serde_json::{Value, json};
use shared::models::{UserCreate, UserRole};
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
}

fn test_config() -> Config {
    Config {
        http_port: 0,
        database_url: ":memory:".into(),
        environment: "test".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".into(),
            expiration_minutes: 60,
            issuer: "salon-server".into(),
            audience: "salon-clients".into(),
        },
        otp_ttl_seconds: 300,
        default_search_radius_km: 5.0,
        super_admin_phone: None,
        super_admin_password: None,
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let state = ServerState::new(test_config(), db.pool);
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Send a request, returning the status and the JSON body (`Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    /// Insert an account directly and mint a token for it
    pub async fn account(&self, phone: &str, role: UserRole) -> (i64, String) {
        let user = user_repo::create(
            &self.state.pool,
            UserCreate {
                name: format!("User {phone}"),
                email: None,
                phone: phone.to_string(),
                whatsapp: None,
                password_hash: "$argon2id$unused".into(),
                role,
            },
        )
        .await
        .expect("create user");
        let token = self
            .state
            .get_jwt_service()
            .generate_token(user.id, &user.name, role, None)
            .expect("token");
        (user.id, token)
    }

    pub async fn admin(&self) -> String {
        self.account("9000000001", UserRole::Admin).await.1
    }

    pub async fn super_admin(&self) -> String {
        self.account("9000000002", UserRole::SuperAdmin).await.1
    }

    /// Sign up and log in through the API
    pub async fn signup_and_login(&self, payload: Value) -> (Value, String) {
        let phone = payload["phone"].as_str().expect("phone").to_string();
        let password = payload["password"].as_str().expect("password").to_string();
        let (status, body) = self.post("/api/auth/signup", None, payload).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

        let (status, login) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "phone": phone, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {login}");
        let token = login["token"].as_str().expect("token").to_string();
        (login, token)
    }

    pub async fn customer(&self, phone: &str) -> String {
        self.signup_and_login(json!({
            "name": "Asha",
            "phone": phone,
            "password": "secret123",
            "role": "customer"
        }))
        .await
        .1
    }

    /// A verified salon with a paid subscription, returning (salon id, owner token)
    pub async fn subscribed_salon(&self, phone: &str, admin: &str) -> (i64, String) {
        let (login, token) = self
            .signup_and_login(json!({
                "name": "Meera",
                "phone": phone,
                "password": "secret123",
                "role": "salon_owner",
                "salon": salon_payload(12.9716, 77.5946),
            }))
            .await;
        let salon_id = login["role_details"]["profile"]["id"]
            .as_i64()
            .expect("salon id");

        let (status, _) = self
            .patch(&format!("/api/salons/{salon_id}/verify"), Some(admin), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);

        let plan_id = self.plan(admin).await;
        let (status, body) = self
            .post(
                "/api/subscriptions/subscribe",
                Some(&token),
                json!({ "plan_id": plan_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "subscribe failed: {body}");
        (salon_id, token)
    }

    /// The "Monthly" plan, created on first use
    pub async fn plan(&self, admin: &str) -> i64 {
        let (_, plans) = self.get("/api/subscriptions/plans", Some(admin)).await;
        if let Some(id) = plans
            .as_array()
            .and_then(|p| p.iter().find(|p| p["name"] == "Monthly"))
            .and_then(|p| p["id"].as_i64())
        {
            return id;
        }
        let (status, plan) = self
            .post(
                "/api/subscriptions/plans",
                Some(admin),
                json!({ "name": "Monthly", "price": 1000.0, "duration_in_days": 30, "features": ["Listing"] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "plan failed: {plan}");
        plan["id"].as_i64().expect("plan id")
    }

    pub async fn category(&self, admin: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/categories",
                Some(admin),
                json!({ "name": name, "gender": "unisex" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "category failed: {body}");
        body["id"].as_i64().expect("category id")
    }

    pub async fn service_item(&self, owner: &str, category_id: i64, name: &str, price: f64, mins: i64) -> i64 {
        let (status, body) = self
            .post(
                "/api/service-items",
                Some(owner),
                json!({ "name": name, "category_id": category_id, "price": price, "duration_mins": mins }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "service item failed: {body}");
        body["id"].as_i64().expect("item id")
    }
}

pub fn salon_payload(lat: f64, lon: f64) -> Value {
    json!({
        "shop_type": "personal",
        "shop_name": "Glow Studio",
        "salon_category": "unisex",
        "location": {
            "latitude": lat,
            "longitude": lon,
            "address": "MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560001"
        },
        "government_id": { "id_type": "pan", "id_number": "ABCDE1234F" }
    })
}

/// Error code carried in an error body
pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}

/// A date comfortably in the future as `booking_date_time` parts
pub fn future_date() -> Value {
    use chrono::{Datelike, Duration, Utc};
    let date = Utc::now().date_naive() + Duration::days(30);
    json!({ "year": date.year(), "month": date.month(), "day": date.day() })
}
