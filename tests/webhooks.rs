//! Tests for the PayOS webhook: signature gate, confirmation ladder and
//! idempotent paid-claims.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;
use common::*;

fn raw_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/payment/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn probe_answers_get() {
    let app = test_app(test_state());

    let body = expect_json(&app, get("/payment/webhook"), StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "PayOS webhook endpoint ready");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = test_app(test_state());

    let body = expect_json(&app, raw_post("not json"), StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Invalid webhook payload");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = test_app(test_state());

    // No signature, no data.
    let body = expect_json(
        &app,
        post_json("/payment/webhook", &json!({"code": "00", "desc": "ok"})),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Invalid webhook payload");
}

#[tokio::test]
async fn wrong_signature_is_rejected_before_any_lookup() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state.clone());

    let mut payload = signed_webhook(order.order_code, 450_000, "00");
    payload["signature"] = json!("deadbeef");

    let body = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(body["error"], "Invalid signature");

    // Nothing was logged and the order is untouched.
    let conn = state.db.get().unwrap();
    assert!(payment_log_events(&conn).is_empty());
    let order = queries::get_order_by_code(&conn, order.order_code).unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn tampered_data_fails_the_signature_check() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let mut payload = signed_webhook(order.order_code, 450_000, "00");
    payload["data"]["amount"] = json!(1);

    let body = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(body["error"], "Invalid signature");
}

#[tokio::test]
async fn unknown_order_is_not_found_but_logged() {
    let state = test_state();
    let app = test_app(state.clone());

    let payload = signed_webhook(123_456_789, 450_000, "00");
    let body = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::NOT_FOUND)
        .await;
    assert_eq!(body["error"], "Order not found");

    let conn = state.db.get().unwrap();
    assert_eq!(payment_log_events(&conn), vec!["webhook_received"]);
}

#[tokio::test]
async fn non_success_code_is_acknowledged_without_changes() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state.clone());

    let payload = signed_webhook(order.order_code, 450_000, "01");
    let body = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Webhook received");

    let conn = state.db.get().unwrap();
    let order = queries::get_order_by_code(&conn, order.order_code).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn successful_payment_flips_the_order_to_processing() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state.clone());

    let payload = signed_webhook(order.order_code, 450_000, "00");
    let body = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;
    assert_eq!(body["message"], "Payment confirmed");

    let conn = state.db.get().unwrap();
    let order = queries::get_order_by_code(&conn, order.order_code).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(payment_log_events(&conn), vec!["webhook_received"]);
}

#[tokio::test]
async fn duplicate_delivery_is_acknowledged_once() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state.clone());

    let payload = signed_webhook(order.order_code, 450_000, "00");
    let first = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;
    assert_eq!(first["message"], "Payment confirmed");

    let second = expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;
    assert_eq!(second["message"], "Already processed");

    let conn = state.db.get().unwrap();
    assert_eq!(
        payment_log_events(&conn),
        vec!["webhook_received", "webhook_received", "webhook_duplicate"]
    );
}

#[tokio::test]
async fn member_orders_accrue_loyalty_points() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_profile(&conn, "user-1", "Trần Thị Mai");
        seed_order(&conn, Some("user-1"), 1_200_000)
    };
    let app = test_app(state.clone());

    let payload = signed_webhook(order.order_code, 1_200_000, "00");
    expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;

    let conn = state.db.get().unwrap();
    let profile = queries::get_profile(&conn, "user-1").unwrap().unwrap();
    assert_eq!(profile.loyalty_points, 1200);
    assert_eq!(profile.lifetime_points, 1200);
    assert_eq!(profile.loyalty_tier.as_str(), "silver");

    let transactions = queries::list_loyalty_transactions(&conn, "user-1", 20).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, 1200);
    assert_eq!(
        transactions[0].description.as_deref(),
        Some(format!("Đơn hàng #{}", order.order_code).as_str())
    );
}

#[tokio::test]
async fn duplicate_delivery_accrues_points_only_once() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_profile(&conn, "user-2", "Lê Văn Bình");
        seed_order(&conn, Some("user-2"), 500_000)
    };
    let app = test_app(state.clone());

    let payload = signed_webhook(order.order_code, 500_000, "00");
    expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;
    expect_json(&app, post_json("/payment/webhook", &payload), StatusCode::OK).await;

    let conn = state.db.get().unwrap();
    let profile = queries::get_profile(&conn, "user-2").unwrap().unwrap();
    assert_eq!(profile.loyalty_points, 500);
    assert_eq!(queries::list_loyalty_transactions(&conn, "user-2", 20).unwrap().len(), 1);
}
