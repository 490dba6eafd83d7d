//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) over a `#[sqlx::test]` pool and provides small request
//! helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use palletmarket_api::config::ServerConfig;
use palletmarket_api::router::build_app_router;
use palletmarket_api::state::AppState;
use palletmarket_db::models::user::CreateUser;
use palletmarket_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors `main.rs` so tests exercise the same
/// stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user row directly; tests need owners and reviewers but the
/// API deliberately has no user endpoints (auth is external).
pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            display_name: Some("Test User".to_string()),
            company_name: None,
            user_type: None,
        },
    )
    .await
    .expect("failed to seed user")
    .id
}

/// A valid listing creation payload owned by `user_id`.
pub fn listing_payload(user_id: i64) -> serde_json::Value {
    serde_json::json!({
        "listing_type": "for_sale",
        "title": "Test Pallet",
        "description": "A sturdy batch of standard euro pallets, dry-stored and ready for same-day pickup.",
        "top_category_id": "euro",
        "category_id": "epal",
        "standard_id": "epal-std",
        "model_id": "epal-1",
        "variant_id": "v1",
        "condition": "used",
        "quantity": 40,
        "city": "Istanbul",
        "district": "Kadikoy",
        "neighborhood": "Moda",
        "photos": ["photos/pallet-front.jpg"],
        "contact_phone": "+90 555 000 0000",
        "contact_email": "seller@example.com",
        "user_id": user_id
    })
}

/// Create a listing through the API and return `(listing_id, body)`.
pub async fn create_listing(pool: &PgPool, user_id: i64) -> (i64, serde_json::Value) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/listings", listing_payload(user_id)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().expect("listing id");
    (id, body)
}

/// Look up the approval record auto-created for a listing, returning its id.
pub async fn approval_id_for_listing(pool: &PgPool, listing_id: i64) -> i64 {
    sqlx::query_scalar("SELECT id FROM listing_approvals WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_one(pool)
        .await
        .expect("approval record for listing")
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request_json(app, Method::DELETE, uri, body).await
}

async fn request_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
