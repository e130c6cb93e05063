//! Tests for the admin order list and the status state machine.

use axum::http::StatusCode;
use rusqlite::Connection;
use serde_json::json;

mod common;
use common::*;

fn force_status(conn: &Connection, id: &str, status: OrderStatus, payment: PaymentStatus) {
    conn.execute(
        "UPDATE orders SET status = ?1, payment_status = ?2 WHERE id = ?3",
        rusqlite::params![status.as_str(), payment.as_str(), id],
    )
    .unwrap();
}

fn status_update(status: &str) -> serde_json::Value {
    json!({"status": status})
}

#[tokio::test]
async fn order_list_carries_next_action_hints() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/orders", None), StatusCode::OK).await;
    assert_eq!(body["count"], 1);
    let listed = &body["orders"][0];
    assert_eq!(listed["orderCode"], order.order_code);
    assert_eq!(listed["status"], "pending");
    assert_eq!(listed["paymentStatus"], "pending");
    assert_eq!(listed["nextAction"], "Wait for Payment");
}

#[tokio::test]
async fn order_list_filters_by_status() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 100_000);
        let shipped = seed_order(&conn, None, 200_000);
        force_status(&conn, &shipped.id, OrderStatus::Shipped, PaymentStatus::Paid);
    }
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/orders?status=shipped", None), StatusCode::OK)
        .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["orders"][0]["status"], "shipped");
    assert_eq!(body["orders"][0]["nextAction"], "Mark Delivered");
}

#[tokio::test]
async fn order_list_rejects_unknown_status_filters() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        admin("GET", "/admin/orders?status=teleported", None),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Unknown status: teleported");
}

#[tokio::test]
async fn legal_transition_updates_the_order() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("processing")),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["status"], "processing");
    assert_eq!(body["order"]["nextAction"], "Ship Order");
}

#[tokio::test]
async fn illegal_transition_reports_from_and_to() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("shipped")),
        ),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Invalid status transition");
    assert_eq!(body["details"]["from"], "pending");
    assert_eq!(body["details"]["to"], "shipped");
}

#[tokio::test]
async fn unknown_status_value_is_a_bad_request() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("teleported")),
        ),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Unknown status: teleported");
}

#[tokio::test]
async fn missing_status_is_a_bad_request() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&json!({})),
        ),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Status is required");
}

#[tokio::test]
async fn updating_a_missing_order_is_not_found() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        admin("PUT", "/admin/orders/ghost/status", Some(&status_update("processing"))),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn refund_marks_the_payment_refunded() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        let order = seed_order(&conn, None, 450_000);
        force_status(&conn, &order.id, OrderStatus::Delivered, PaymentStatus::Paid);
        order
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("refunded")),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["order"]["status"], "refunded");
    assert_eq!(body["order"]["paymentStatus"], "refunded");
}

#[tokio::test]
async fn cancelling_an_unpaid_order_fails_the_payment() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        seed_order(&conn, None, 450_000)
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("cancelled")),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["order"]["status"], "cancelled");
    assert_eq!(body["order"]["paymentStatus"], "failed");
}

#[tokio::test]
async fn cancelling_a_paid_shipment_keeps_the_payment_paid() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        let order = seed_order(&conn, None, 450_000);
        force_status(&conn, &order.id, OrderStatus::Shipped, PaymentStatus::Paid);
        order
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("cancelled")),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["order"]["status"], "cancelled");
    assert_eq!(body["order"]["paymentStatus"], "paid");
}

#[tokio::test]
async fn terminal_states_stay_terminal() {
    let state = test_state();
    let order = {
        let conn = state.db.get().unwrap();
        let order = seed_order(&conn, None, 450_000);
        force_status(&conn, &order.id, OrderStatus::Cancelled, PaymentStatus::Failed);
        order
    };
    let app = test_app(state);

    let response = send(
        &app,
        admin(
            "PUT",
            &format!("/admin/orders/{}/status", order.id),
            Some(&status_update("processing")),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
