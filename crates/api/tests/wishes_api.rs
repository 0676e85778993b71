//! HTTP-level integration tests for the wish catalog.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, create_test_user, delete_auth, get, get_auth, money, patch_json_auth,
    post_json_auth, token_for,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;

/// Create a wish through the API and return its JSON rendering.
async fn create_wish(app: Router, token: &str, name: &str, price: i64) -> serde_json::Value {
    let body = serde_json::json!({
        "name": name,
        "link": "https://shop.example.com/item",
        "image": "https://img.example.com/item.png",
        "price": price,
        "description": "something nice"
    });
    let response = post_json_auth(app, "/wishes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_wish(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish = create_wish(app, &token, "Camera", 500).await;

    assert_eq!(wish["name"], "Camera");
    assert_eq!(money(&wish["price"]), dec!(500));
    assert_eq!(money(&wish["raised"]), dec!(0));
    assert_eq!(wish["copied"], 0);
    assert_eq!(wish["owner"]["username"], "owner");
    assert_eq!(wish["offers"].as_array().map(Vec::len), Some(0));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_wish_requires_link_and_image(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "No link",
        "image": "https://img.example.com/item.png",
        "price": 10
    });
    let response = post_json_auth(app.clone(), "/wishes", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Link is required");

    let body = serde_json::json!({
        "name": "No image",
        "link": "https://shop.example.com/item",
        "price": 10
    });
    let response = post_json_auth(app, "/wishes", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Image is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_owner_edits(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let stranger = create_test_user(&pool, "stranger").await;
    let app = common::build_test_app(pool);

    let wish = create_wish(app.clone(), &token_for(&owner), "Guarded", 100).await;
    let id = wish["id"].as_i64().unwrap();

    let body = serde_json::json!({ "name": "Hijacked" });
    let response =
        patch_json_auth(app, &format!("/wishes/{id}"), body, &token_for(&stranger)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "You cannot edit this wish");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_price_frozen_after_first_offer(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let backer = create_test_user(&pool, "backer").await;
    let owner_token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish = create_wish(app.clone(), &owner_token, "Frozen", 100).await;
    let id = wish["id"].as_i64().unwrap();

    // Price changes freely while the ledger is empty.
    let body = serde_json::json!({ "price": 120 });
    let response = patch_json_auth(app.clone(), &format!("/wishes/{id}"), body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "amount": 30 });
    let response =
        post_json_auth(app.clone(), &format!("/wishes/{id}/offers"), body, &token_for(&backer))
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // A real change is rejected now.
    let body = serde_json::json!({ "price": 150 });
    let response = patch_json_auth(app.clone(), &format!("/wishes/{id}"), body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot change price after contributions exist"
    );

    // Restating the current price is a no-op, not an error.
    let body = serde_json::json!({ "price": 120, "name": "Still frozen" });
    let response = patch_json_auth(app, &format!("/wishes/{id}"), body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Still frozen");
    assert_eq!(money(&json["price"]), dec!(120));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_blocked_by_ledger_entries(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let backer = create_test_user(&pool, "backer").await;
    let owner_token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish = create_wish(app.clone(), &owner_token, "Sticky", 100).await;
    let id = wish["id"].as_i64().unwrap();

    let body = serde_json::json!({ "amount": 10 });
    let response =
        post_json_auth(app.clone(), &format!("/wishes/{id}/offers"), body, &token_for(&backer))
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Cancelling the offer does not unblock deletion; the row still exists.
    let response = delete_auth(app, &format!("/wishes/{id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot delete wish with existing offers"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_returns_final_rendering(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish = create_wish(app.clone(), &token, "Ephemeral", 42).await;
    let id = wish["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/wishes/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ephemeral");

    let response = get_auth(app, &format!("/wishes/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_copy_semantics(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let copier = create_test_user(&pool, "copier").await;
    let backer = create_test_user(&pool, "backer").await;
    let app = common::build_test_app(pool);

    let source = create_wish(app.clone(), &token_for(&owner), "Original", 100).await;
    let source_id = source["id"].as_i64().unwrap();

    // Fund the source so the copy's empty ledger is observable.
    let body = serde_json::json!({ "amount": 60 });
    let response = post_json_auth(
        app.clone(),
        &format!("/wishes/{source_id}/offers"),
        body,
        &token_for(&backer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        app.clone(),
        &format!("/wishes/{source_id}/copy"),
        serde_json::json!({}),
        &token_for(&copier),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let copy = body_json(response).await;

    assert_ne!(copy["id"], source["id"]);
    assert_eq!(copy["name"], "Original");
    assert_eq!(copy["owner"]["username"], "copier");
    assert_eq!(copy["copied"], 0, "the duplicate starts with a zero counter");
    assert_eq!(money(&copy["raised"]), dec!(0), "the duplicate carries no offers");
    assert_eq!(copy["offers"].as_array().map(Vec::len), Some(0));

    let response = get_auth(app, &format!("/wishes/{source_id}"), &token_for(&owner)).await;
    let source_after = body_json(response).await;
    assert_eq!(source_after["copied"], 1, "the source counter increments");
    assert_eq!(money(&source_after["raised"]), dec!(60), "the source ledger is untouched");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_listings_without_token(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    create_wish(app.clone(), &token_for(&owner), "Visible", 10).await;

    let response = get(app.clone(), "/wishes/last").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().expect("listing is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Visible");
    assert!(items[0].get("offers").is_none(), "summaries carry no offer detail");

    let response = get(app, "/wishes/top").await;
    assert_eq!(response.status(), StatusCode::OK);
}
