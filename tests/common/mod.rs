//! Test utilities and fixtures for teashop integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

pub use teashop::db::{init_db, queries, AppState};
pub use teashop::handlers;
pub use teashop::models::*;
pub use teashop::orders::{OrderStatus, PaymentStatus};
pub use teashop::payments::{sign_webhook_data, PayOsClient, PayOsConfig};
pub use teashop::rate_limit::{RateLimitConfig, RateLimiters, RouteLimit};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const CHECKSUM_KEY: &str = "test-checksum-key";

/// Create an AppState over a shared in-memory database, with rate limiting
/// disabled so unrelated suites never trip a quota.
pub fn test_state() -> AppState {
    test_state_with_limits(RateLimitConfig::disabled())
}

pub fn test_state_with_limits(config: RateLimitConfig) -> AppState {
    // The default api_base points at a closed port so gateway calls fail
    // fast in the payment-failure tests.
    test_state_with(config, "http://127.0.0.1:1")
}

/// State wired to a PayOS mock server (see the payment suite).
pub fn test_state_with_payos_base(api_base: &str) -> AppState {
    test_state_with(RateLimitConfig::disabled(), api_base)
}

fn test_state_with(config: RateLimitConfig, payos_api_base: &str) -> AppState {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(4).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }

    let payos = PayOsClient::new(PayOsConfig {
        client_id: "test-client".to_string(),
        api_key: "test-api-key".to_string(),
        checksum_key: CHECKSUM_KEY.to_string(),
        api_base: payos_api_base.to_string(),
    });

    AppState {
        db: pool,
        base_url: "http://localhost:3000".to_string(),
        payos,
        admin_token: ADMIN_TOKEN.to_string(),
        limiters: Arc::new(RateLimiters::new(&config)),
    }
}

/// The full application router with a mocked peer address, mirroring the
/// production setup in main.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::public::router())
        .merge(handlers::webhooks::router())
        .merge(handlers::admin::router(state.clone()))
        .with_state(state)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
}

// ============ Request helpers ============

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Request with a bearer token. `body = None` sends an empty body.
pub fn authed(method: &str, uri: &str, token: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn admin(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
    authed(method, uri, ADMIN_TOKEN, body)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("Response should be valid JSON")
}

/// Send, assert the status, and return the parsed body.
pub async fn expect_json(app: &Router, request: Request<Body>, status: StatusCode) -> Value {
    let response = send(app, request).await;
    let got = response.status();
    let body = body_json(response).await;
    assert_eq!(got, status, "unexpected status, body: {body}");
    body
}

// ============ Fixtures ============

pub fn seed_product(conn: &Connection, slug: &str, name: &str, price: i64) -> Product {
    let input = ProductInput {
        slug: Some(slug.to_string()),
        name: Some(name.to_string()),
        price: Some(price),
        category: Some("tea".to_string()),
        tea_type: Some("green".to_string()),
        description: Some(format!("Trà thử nghiệm {name}")),
        ..Default::default()
    };
    queries::create_product(conn, &input).expect("Failed to create test product")
}

pub fn seed_product_out_of_stock(conn: &Connection, slug: &str, price: i64) -> Product {
    let input = ProductInput {
        slug: Some(slug.to_string()),
        name: Some(format!("Hết hàng {slug}")),
        price: Some(price),
        category: Some("tea".to_string()),
        in_stock: Some(false),
        ..Default::default()
    };
    queries::create_product(conn, &input).expect("Failed to create test product")
}

pub fn seed_order(conn: &Connection, user_id: Option<&str>, total: i64) -> Order {
    let guest = json!({"name": "Nguyễn Văn An", "phone": "0912345678"});
    let items = json!([
        {"id": "p-test", "name": "Shan Tuyết", "price": total, "quantity": 1}
    ]);
    queries::create_order(conn, user_id, &guest, total, &items, Some("payos"))
        .expect("Failed to create test order")
}

pub fn seed_profile(conn: &Connection, id: &str, full_name: &str) -> Profile {
    queries::create_profile(conn, id, full_name).expect("Failed to create test profile")
}

/// Checkout payload matching `items`, with the total the server will compute.
pub fn order_request(items: &[(&Product, i64)]) -> Value {
    let total: i64 = items.iter().map(|(p, qty)| p.price * qty).sum();
    json!({
        "items": items
            .iter()
            .map(|(p, qty)| json!({"productId": p.id, "quantity": qty, "price": p.price}))
            .collect::<Vec<_>>(),
        "total": total,
        "customerInfo": {
            "name": "Nguyễn Văn An",
            "phone": "0912345678",
            "email": "an@example.com",
            "address": "12 Phố Huế, Hai Bà Trưng",
            "city": "Hà Nội"
        }
    })
}

/// A correctly signed PayOS webhook payload for `order_code`.
pub fn signed_webhook(order_code: i64, amount: i64, code: &str) -> Value {
    let data = json!({
        "orderCode": order_code,
        "amount": amount,
        "description": format!("84tea - Đơn hàng #{order_code}"),
        "reference": "FT0001",
        "transactionDateTime": "2026-01-15 10:30:00",
    });
    let signature = sign_webhook_data(data.as_object().unwrap(), CHECKSUM_KEY);
    json!({
        "code": code,
        "desc": if code == "00" { "success" } else { "failed" },
        "data": data,
        "signature": signature,
    })
}

pub fn payment_log_events(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT event FROM payment_logs ORDER BY created_at, id")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}
