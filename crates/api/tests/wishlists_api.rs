//! HTTP-level integration tests for wishlists.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, create_test_user, delete_auth, get_auth, money, patch_json_auth, post_json_auth,
    token_for,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;

async fn create_wish(app: Router, token: &str, name: &str, price: i64) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "link": "https://shop.example.com/item",
        "image": "https://img.example.com/item.png",
        "price": price
    });
    let response = post_json_auth(app, "/wishes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_wishlist_with_members(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let backer = create_test_user(&pool, "backer").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let first = create_wish(app.clone(), &token, "First", 50).await;
    let second = create_wish(app.clone(), &token, "Second", 80).await;

    // Fund one member so the rendering shows a derived raised amount.
    let body = serde_json::json!({ "wishId": first, "amount": 20 });
    let response = post_json_auth(app.clone(), "/offers", body, &token_for(&backer)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "name": "Birthday", "itemsId": [first, second] });
    let response = post_json_auth(app, "/wishlists", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Birthday");
    assert_eq!(json["owner"]["username"], "owner");
    let items = json["items"].as_array().expect("items is an array");
    assert_eq!(items.len(), 2);
    let first_item = items.iter().find(|i| i["id"] == first).unwrap();
    assert_eq!(money(&first_item["raised"]), dec!(20));
    assert!(first_item.get("offers").is_none(), "members are summaries, not details");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_member_resolution_is_all_or_nothing(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish_id = create_wish(app.clone(), &token, "Real", 50).await;

    let body = serde_json::json!({ "name": "Broken", "itemsId": [wish_id, 999_999] });
    let response = post_json_auth(app.clone(), "/wishlists", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "One or more wishes not found");

    // Nothing was persisted.
    let response = get_auth(app, "/wishlists", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_replaces_membership(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let first = create_wish(app.clone(), &token, "First", 50).await;
    let second = create_wish(app.clone(), &token, "Second", 80).await;

    let body = serde_json::json!({ "name": "List", "itemsId": [first] });
    let response = post_json_auth(app.clone(), "/wishlists", body, &token).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "itemsId": [second] });
    let response = patch_json_auth(app.clone(), &format!("/wishlists/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], second);

    // An absent itemsId leaves the membership untouched.
    let body = serde_json::json!({ "name": "Renamed" });
    let response = patch_json_auth(app, &format!("/wishlists/{id}"), body, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["items"].as_array().map(Vec::len), Some(1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_only_owner_modifies(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let stranger = create_test_user(&pool, "stranger").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Private list" });
    let response = post_json_auth(app.clone(), "/wishlists", body, &token_for(&owner)).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "name": "Hijacked" });
    let response =
        patch_json_auth(app.clone(), &format!("/wishlists/{id}"), body, &token_for(&stranger))
            .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "You cannot modify this wishlist");

    let response =
        delete_auth(app, &format!("/wishlists/{id}"), &token_for(&stranger)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_keeps_member_wishes(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    let wish_id = create_wish(app.clone(), &token, "Survivor", 50).await;

    let body = serde_json::json!({ "name": "Doomed", "itemsId": [wish_id] });
    let response = post_json_auth(app.clone(), "/wishlists", body, &token).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/wishlists/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Doomed");

    let response = get_auth(app.clone(), &format!("/wishlists/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &format!("/wishes/{wish_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK, "member wishes outlive the list");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_topic_filter(pool: PgPool) {
    let owner = create_test_user(&pool, "owner").await;
    let token = token_for(&owner);
    let app = common::build_test_app(pool);

    for name in ["Birthday", "Wedding"] {
        let body = serde_json::json!({ "name": name });
        let response = post_json_auth(app.clone(), "/wishlists", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/wishlists?topic=Birthday", &token).await;
    let json = body_json(response).await;
    let lists = json.as_array().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["name"], "Birthday");

    let response = get_auth(app, "/wishlists", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}
