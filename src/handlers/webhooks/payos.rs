//! PayOS payment webhook.
//!
//! Never rate-limited: the gateway retries on anything but a 2xx and
//! backing it off would delay order confirmation. Idempotency comes from
//! the transactional paid-claim, not from dedup state.

use axum::body::Bytes;
use axum::extract::State;
use serde::Serialize;
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::Json;
use crate::orders::PaymentStatus;
use crate::payments::{events, verify_webhook_signature};
use crate::validation;

#[derive(Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: &'static str,
}

fn ok(message: &'static str) -> Json<WebhookResponse> {
    Json(WebhookResponse {
        success: true,
        message,
    })
}

pub async fn handle_payos_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResponse>> {
    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest(msg::INVALID_WEBHOOK_PAYLOAD.to_string()))?;
    let envelope = validation::validate_webhook(&payload)
        .ok_or_else(|| AppError::BadRequest(msg::INVALID_WEBHOOK_PAYLOAD.to_string()))?;

    if !verify_webhook_signature(&envelope.data, &envelope.signature, state.payos.checksum_key())
    {
        tracing::warn!(order_code = envelope.order_code, "webhook signature mismatch");
        return Err(AppError::BadRequest(msg::INVALID_SIGNATURE.to_string()));
    }

    let mut conn = state.db.get()?;
    queries::log_payment_event(
        &conn,
        events::WEBHOOK_RECEIVED,
        &json!({"orderCode": envelope.order_code, "code": envelope.code}),
    )?;

    let order = queries::get_order_by_code(&conn, envelope.order_code)
        .or_not_found(msg::ORDER_NOT_FOUND)?;

    if order.payment_status == PaymentStatus::Paid {
        queries::log_payment_event(
            &conn,
            events::WEBHOOK_DUPLICATE,
            &json!({"orderCode": envelope.order_code}),
        )?;
        return Ok(ok("Already processed"));
    }

    // Non-success gateway codes are acknowledged without touching the
    // order; PayOS sends them for cancelled or expired checkouts.
    if envelope.code != "00" {
        tracing::info!(
            order_code = envelope.order_code,
            code = %envelope.code,
            "webhook with non-success code"
        );
        return Ok(ok("Webhook received"));
    }

    if queries::try_mark_order_paid(&mut conn, envelope.order_code)? {
        tracing::info!(order_code = envelope.order_code, "payment confirmed");
        Ok(ok("Payment confirmed"))
    } else {
        // Lost the race against a concurrent delivery of the same webhook.
        queries::log_payment_event(
            &conn,
            events::WEBHOOK_DUPLICATE,
            &json!({"orderCode": envelope.order_code}),
        )?;
        Ok(ok("Already processed"))
    }
}

#[derive(Serialize)]
pub struct WebhookProbeResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// PayOS calls GET on the configured webhook URL when the merchant saves
/// it, so the route answers both methods.
pub async fn webhook_probe() -> Json<WebhookProbeResponse> {
    Json(WebhookProbeResponse {
        status: "ok",
        message: "PayOS webhook endpoint ready",
    })
}
