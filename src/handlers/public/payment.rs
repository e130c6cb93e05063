use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::json;

use crate::cart;
use crate::db::{queries, AppState};
use crate::error::{AppError, Result, msg};
use crate::extractors::Json;
use crate::handlers::rate_limited;
use crate::models::PaymentLinkRequest;
use crate::payments::{events, CreatePaymentLink, PaymentLinkItem};
use crate::util::client_ip;
use crate::validation;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    pub checkout_url: String,
    pub order_code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

pub async fn create_payment_link(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<PaymentLinkRequest>,
) -> Result<Json<PaymentLinkResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_payments(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let order_code =
        validation::validate_payment_link(&request).map_err(|details| AppError::Validation {
            error: msg::VALIDATION_FAILED.to_string(),
            details: json!(details),
        })?;

    // The link is priced from the catalog, not from the client's amounts.
    let (validated, server_total) = {
        let conn = state.db.get()?;
        let items = request.items.as_deref().unwrap_or_default();
        let validated = cart::validate_cart_items(&conn, items)?;
        let total = cart::order_total(&validated);
        (validated, total)
    };
    if let Some(amount) = request.amount {
        if amount != server_total {
            return Err(AppError::BadRequest(msg::PRICE_MISMATCH.to_string()));
        }
    }

    let description = request
        .description
        .clone()
        .unwrap_or_else(|| format!("84tea - Đơn hàng #{order_code}"));
    let link_request = CreatePaymentLink {
        order_code,
        amount: server_total,
        description,
        items: validated
            .iter()
            .map(|item| PaymentLinkItem::new(&item.name, item.quantity, item.price))
            .collect(),
        return_url: request.return_url.clone().unwrap_or_default(),
        cancel_url: request.cancel_url.clone().unwrap_or_default(),
        buyer_name: request.buyer_name.clone(),
        buyer_email: request.buyer_email.clone(),
        buyer_phone: request.buyer_phone.clone(),
    };

    match state.payos.create_payment_link(&link_request).await {
        Ok(link) => {
            let conn = state.db.get()?;
            queries::log_payment_event(
                &conn,
                events::PAYMENT_CREATED,
                &json!({"orderCode": order_code, "amount": server_total}),
            )?;
            Ok(Json(PaymentLinkResponse {
                checkout_url: link.checkout_url,
                order_code,
                qr_code: link.qr_code,
            }))
        }
        Err(e) => {
            tracing::error!(order_code, error = %e, "payment link creation failed");
            let conn = state.db.get()?;
            queries::log_payment_event(
                &conn,
                events::PAYMENT_FAILED,
                &json!({"error": msg::PAYMENT_LINK_FAILED, "orderCode": order_code}),
            )?;
            Err(AppError::Payment(msg::PAYMENT_LINK_FAILED.to_string()))
        }
    }
}
