//! Tests for the admin franchise, contact and payment-log surfaces.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::*;

fn seed_application(conn: &rusqlite::Connection, name: &str) -> FranchiseApplication {
    queries::create_franchise_application(
        conn,
        name,
        "mai@example.com",
        "0987654321",
        "Hà Nội",
        Some("500 triệu - 1 tỷ"),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn franchise_list_counts_applications() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        seed_application(&conn, "Trần Thị Mai");
        seed_application(&conn, "Lê Văn Bình");
    }
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/franchise", None), StatusCode::OK).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["applications"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn franchise_list_filters_by_status() {
    let state = test_state();
    let reviewed = {
        let conn = state.db.get().unwrap();
        seed_application(&conn, "Trần Thị Mai");
        let reviewed = seed_application(&conn, "Lê Văn Bình");
        queries::update_franchise_status(&conn, &reviewed.id, ApplicationStatus::Reviewed)
            .unwrap()
            .unwrap();
        reviewed
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin("GET", "/admin/franchise?status=reviewed", None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["applications"][0]["id"], reviewed.id.as_str());

    let body = expect_json(
        &app,
        admin("GET", "/admin/franchise?status=partnered", None),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"], "Unknown status: partnered");
}

#[tokio::test]
async fn franchise_list_pages_but_counts_everything() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        seed_application(&conn, "Trần Thị Mai");
        seed_application(&conn, "Lê Văn Bình");
        seed_application(&conn, "Phạm Quốc Cường");
    }
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin("GET", "/admin/franchise?limit=2", None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["applications"].as_array().unwrap().len(), 2);

    let body = expect_json(
        &app,
        admin("GET", "/admin/franchise?limit=2&offset=2", None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["applications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn franchise_status_update_round_trips() {
    let state = test_state();
    let application = {
        let conn = state.db.get().unwrap();
        seed_application(&conn, "Trần Thị Mai")
    };
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin(
            "PUT",
            &format!("/admin/franchise/{}/status", application.id),
            Some(&json!({"status": "approved"})),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["application"]["status"], "approved");
}

#[tokio::test]
async fn franchise_status_update_of_missing_application() {
    let app = test_app(test_state());

    let body = expect_json(
        &app,
        admin("PUT", "/admin/franchise/ghost/status", Some(&json!({"status": "approved"}))),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["error"], "Application not found");
}

#[tokio::test]
async fn contact_list_counts_messages() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        queries::create_contact_message(
            &conn,
            "Nguyễn Văn An",
            "an@example.com",
            None,
            "general",
            "Cho tôi hỏi về giờ mở cửa của cửa hàng.",
        )
        .unwrap();
    }
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/contact", None), StatusCode::OK).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["messages"][0]["subject"], "general");
}

#[tokio::test]
async fn contact_list_pages_but_counts_everything() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        for i in 0..3 {
            queries::create_contact_message(
                &conn,
                "Nguyễn Văn An",
                "an@example.com",
                None,
                "general",
                &format!("Câu hỏi số {i} về đơn hàng của tôi."),
            )
            .unwrap();
        }
    }
    let app = test_app(state);

    let body = expect_json(
        &app,
        admin("GET", "/admin/contact?limit=2", None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn payment_logs_filter_by_event() {
    let state = test_state();
    {
        let conn = state.db.get().unwrap();
        queries::log_payment_event(&conn, "payment_created", &json!({"orderCode": 1})).unwrap();
        queries::log_payment_event(&conn, "webhook_received", &json!({"orderCode": 1})).unwrap();
        queries::log_payment_event(&conn, "webhook_received", &json!({"orderCode": 2})).unwrap();
    }
    let app = test_app(state);

    let body = expect_json(&app, admin("GET", "/admin/payment-logs", None), StatusCode::OK).await;
    assert_eq!(body["count"], 3);

    let body = expect_json(
        &app,
        admin("GET", "/admin/payment-logs?event=webhook_received", None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["count"], 2);
    for log in body["logs"].as_array().unwrap() {
        assert_eq!(log["event"], "webhook_received");
    }
}

#[tokio::test]
async fn admin_surfaces_all_require_the_token() {
    let app = test_app(test_state());

    for uri in [
        "/admin/orders",
        "/admin/franchise",
        "/admin/contact",
        "/admin/payment-logs",
    ] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
