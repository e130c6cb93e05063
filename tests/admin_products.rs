//! Tests for the admin auth gate and product CRUD.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;
use common::*;

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = test_app(test_state());

    let body = expect_json(&app, get("/admin/products"), StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn malformed_authorization_header_is_unauthorized() {
    let app = test_app(test_state());

    let request = Request::builder()
        .method("GET")
        .uri("/admin/products")
        .header("authorization", "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let body = expect_json(&app, request, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn wrong_token_is_forbidden() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        authed("GET", "/admin/products", "wrong-token", None),
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn empty_configured_token_rejects_everything() {
    let mut state = test_state();
    state.admin_token = String::new();
    let app = test_app(state);

    let response = send(&app, authed("GET", "/admin/products", "", None)).await;
    // "Bearer " with no token never parses, and no token matches an empty
    // configured one.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, authed("GET", "/admin/products", "anything", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_product_returns_created() {
    let app = test_app(test_state());

    let payload = json!({
        "name": "Trà Ô Long Cao Sơn",
        "slug": "o-long-cao-son",
        "price": 650_000,
        "category": "tea",
        "type": "oolong",
    });
    let body = expect_json(
        &app,
        admin("POST", "/admin/products", Some(&payload)),
        StatusCode::CREATED,
    )
    .await;
    let product = &body["product"];
    assert_eq!(product["name"], "Trà Ô Long Cao Sơn");
    assert_eq!(product["slug"], "o-long-cao-son");
    assert_eq!(product["type"], "oolong");
    assert_eq!(product["in_stock"], true);
}

#[tokio::test]
async fn create_without_slug_slugifies_the_name() {
    let app = test_app(test_state());

    let payload = json!({
        "name": "Lunar New Year Gift Box 2026",
        "price": 1_250_000,
        "category": "gift",
    });
    let body = expect_json(
        &app,
        admin("POST", "/admin/products", Some(&payload)),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(body["product"]["slug"], "lunar-new-year-gift-box-2026");
}

#[tokio::test]
async fn create_rejects_incomplete_payloads() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        admin("POST", "/admin/products", Some(&json!({}))),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_object().unwrap();
    assert_eq!(details["name"][0], "Name is required");
    assert_eq!(details["price"][0], "Price is required");
    assert_eq!(details["category"][0], "Category is required");
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        seed_product(&conn, "shan-tuyet", "Trà Shan Tuyết", 450_000);
    }
    let app = test_app(state);

    let payload = json!({
        "name": "Another Tea",
        "slug": "shan-tuyet",
        "price": 100_000,
        "category": "tea",
    });
    let body = expect_json(
        &app,
        admin("POST", "/admin/products", Some(&payload)),
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["error"], "Product with slug 'shan-tuyet' already exists");
}

#[tokio::test]
async fn update_changes_only_the_given_fields() {
    let state = test_state();
    let product = {
        let conn = state.db.get().unwrap();
        seed_product(&conn, "hong-tra", "Hồng Trà", 380_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/products/{}", product.id),
            Some(&json!({"price": 420_000, "featured": true})),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["product"]["price"], 420_000);
    assert_eq!(body["product"]["featured"], true);
    assert_eq!(body["product"]["name"], "Hồng Trà");
}

#[tokio::test]
async fn update_to_a_taken_slug_is_a_conflict() {
    let state = test_state();
    let (_, second) = {
        let conn = state.db.get().unwrap();
        (
            seed_product(&conn, "tra-mot", "Trà Một", 100_000),
            seed_product(&conn, "tra-hai", "Trà Hai", 200_000),
        )
    };
    let app = test_app(state);

    let response = send(
        &app,
        admin(
            "PUT",
            &format!("/admin/products/{}", second.id),
            Some(&json!({"slug": "tra-mot"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_keeping_its_own_slug_is_fine() {
    let state = test_state();
    let product = {
        let conn = state.db.get().unwrap();
        seed_product(&conn, "tra-ba", "Trà Ba", 100_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/products/{}", product.id),
            Some(&json!({"slug": "tra-ba", "price": 150_000})),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["product"]["price"], 150_000);
}

#[tokio::test]
async fn update_of_missing_product_is_not_found() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        admin("PUT", "/admin/products/ghost", Some(&json!({"price": 1}))),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn delete_removes_the_product() {
    let state = test_state();
    let product = {
        let conn = state.db.get().unwrap();
        seed_product(&conn, "tra-xoa", "Trà Xóa", 100_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin("DELETE", &format!("/admin/products/{}", product.id), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["success"], true);

    let response = send(&app, get("/products/tra-xoa")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_product_is_not_found() {
    let app = test_app(test_state());

    let response = send(&app, admin("DELETE", "/admin/products/ghost", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_list_pages_through_the_catalog() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        for i in 0..3 {
            seed_product(&conn, &format!("tra-{i}"), &format!("Trà {i}"), 100_000);
        }
    }
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/products?limit=2", None), StatusCode::OK)
        .await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["count"], 3);
}
