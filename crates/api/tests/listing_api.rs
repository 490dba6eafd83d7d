mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_listing, delete_json, get, listing_payload, post_json,
    put_json, seed_user,
};

// --- Creation & validation ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_listing_starts_unpublished(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (_, body) = create_listing(&pool, user_id).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["is_approved"], false);
    assert_eq!(body["data"]["view_count"], 0);
    assert!(body["data"]["expires_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_short_description(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let mut payload = listing_payload(user_id);
    payload["description"] = json!("too short");

    let response = post_json(build_test_app(pool), "/api/v1/listings", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("50"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_bad_photo_counts(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let app = build_test_app(pool.clone());

    let mut no_photos = listing_payload(user_id);
    no_photos["photos"] = json!([]);
    let response = post_json(app, "/api/v1/listings", no_photos).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut too_many = listing_payload(user_id);
    too_many["photos"] = json!(["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"]);
    let response = post_json(build_test_app(pool), "/api/v1/listings", too_many).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_empty_catalog_reference(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let mut payload = listing_payload(user_id);
    payload["model_id"] = json!("   ");

    let response = post_json(build_test_app(pool), "/api/v1/listings", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_listing_type(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let mut payload = listing_payload(user_id);
    payload["listing_type"] = json!("auction");

    let response = post_json(build_test_app(pool), "/api/v1/listings", payload).await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_title_is_synthesized_from_catalog(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let mut payload = listing_payload(user_id);
    payload.as_object_mut().unwrap().remove("title");

    let response = post_json(build_test_app(pool), "/api/v1/listings", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let title = body["data"]["title"].as_str().unwrap();
    assert!(title.contains("euro"));
    assert!(title.contains("epal-1"));
}

// --- Retrieval ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_includes_owner_and_counts_views(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (listing_id, _) = create_listing(&pool, user_id).await;
    let uri = format!("/api/v1/listings/{listing_id}");

    // First fetch returns the pre-increment count.
    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["view_count"], 0);
    assert_eq!(body["data"]["owner"]["email"], "seller@example.com");
    assert!(body["data"]["owner"].get("password_hash").is_none());

    let response = get(build_test_app(pool), &uri).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["view_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_listing_is_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/listings/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_defaults_to_published_listings(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (listing_id, _) = create_listing(&pool, user_id).await;

    // Freshly created listings are inactive, so the catalog is empty.
    let response = get(build_test_app(pool.clone()), "/api/v1/listings").await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 0);

    // Approve the listing through its workflow record.
    let approval_id = common::approval_id_for_listing(&pool, listing_id).await;
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/approvals/{approval_id}"),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/api/v1/listings").await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["id"], listing_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_city_and_status(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (istanbul_id, _) = create_listing(&pool, user_id).await;

    let mut ankara = listing_payload(user_id);
    ankara["city"] = json!("Ankara");
    let response = post_json(build_test_app(pool.clone()), "/api/v1/listings", ankara).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(
        build_test_app(pool),
        "/api/v1/listings?status=inactive&city=Istanbul",
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["id"], istanbul_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_honors_requested_sort(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;

    for title in ["Zulu pallets", "Alpha pallets", "Mike pallets"] {
        let mut payload = listing_payload(user_id);
        payload["title"] = json!(title);
        let response = post_json(build_test_app(pool.clone()), "/api/v1/listings", payload).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(
        build_test_app(pool),
        "/api/v1/listings?status=inactive&sort_field=title&sort_dir=asc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha pallets", "Mike pallets", "Zulu pallets"]);
}

// --- Updates & deletion ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn partial_update_keeps_omitted_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (listing_id, created) = create_listing(&pool, user_id).await;
    let original_description = created["data"]["description"].as_str().unwrap().to_string();

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/listings/{listing_id}"),
        json!({ "user_id": user_id, "title": "Updated Pallet Batch" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Updated Pallet Batch");
    assert_eq!(body["data"]["description"], original_description.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_by_non_owner_is_forbidden(pool: PgPool) {
    let owner_id = seed_user(&pool, "seller@example.com").await;
    let intruder_id = seed_user(&pool, "intruder@example.com").await;
    let (listing_id, _) = create_listing(&pool, owner_id).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/listings/{listing_id}"),
        json!({ "user_id": intruder_id, "title": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_owner_removes_listing_and_approval(pool: PgPool) {
    let user_id = seed_user(&pool, "seller@example.com").await;
    let (listing_id, _) = create_listing(&pool, user_id).await;
    let approval_id = common::approval_id_for_listing(&pool, listing_id).await;

    let response = delete_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/listings/{listing_id}"),
        json!({ "user_id": user_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/listings/{listing_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The approval record cascades with the listing.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/approvals/{approval_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_non_owner_is_forbidden(pool: PgPool) {
    let owner_id = seed_user(&pool, "seller@example.com").await;
    let intruder_id = seed_user(&pool, "intruder@example.com").await;
    let (listing_id, _) = create_listing(&pool, owner_id).await;

    let response = delete_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/listings/{listing_id}"),
        json!({ "user_id": intruder_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/listings/{listing_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
