use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::cart;
use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::{Json, Query};
use crate::handlers::rate_limited;
use crate::orders::{OrderStatus, PaymentStatus};
use crate::util::client_ip;
use crate::validation;
use crate::models::CreateOrderRequest;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub id: String,
    pub order_code: i64,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub order: CreatedOrder,
}

pub async fn create_order(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderCreatedResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_orders(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    validation::validate_order(&request).map_err(|details| AppError::Validation {
        error: msg::VALIDATION_FAILED.to_string(),
        details: serde_json::json!(details),
    })?;

    let conn = state.db.get()?;

    // Never trust client prices: re-resolve every line against the catalog
    // and compare the client's total with the server's.
    let items = request.items.as_deref().unwrap_or_default();
    let validated = cart::validate_cart_items(&conn, items)?;
    let server_total = cart::order_total(&validated);
    if request.total != Some(server_total) {
        return Err(AppError::BadRequest(msg::PRICE_MISMATCH.to_string()));
    }

    let customer_info = request.customer_info.as_ref().ok_or_else(|| {
        AppError::BadRequest("Customer info is required".to_string())
    })?;
    let order = queries::create_order(
        &conn,
        request.user_id.as_deref(),
        &serde_json::to_value(customer_info)?,
        server_total,
        &serde_json::to_value(&validated)?,
        Some(request.payment_method.as_deref().unwrap_or("payos")),
    )?;

    tracing::info!(order_code = order.order_code, total = order.total, "order created");
    Ok(Json(OrderCreatedResponse {
        success: true,
        order: CreatedOrder {
            id: order.id,
            order_code: order.order_code,
            status: order.status,
            total: order.total,
            created_at: order.created_at,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct OrderLookupQuery {
    pub id: Option<String>,
    #[serde(rename = "orderCode")]
    pub order_code: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_code: i64,
    pub status: OrderStatus,
    pub total: i64,
    pub items: serde_json::Value,
    pub payment_status: PaymentStatus,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct OrderLookupResponse {
    pub success: bool,
    pub order: OrderSummary,
}

pub async fn get_order(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<OrderLookupQuery>,
) -> Result<Json<OrderLookupResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_lookups(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let order = match (&query.id, query.order_code) {
        (Some(id), _) => queries::get_order_by_id(&conn, id),
        (None, Some(code)) => queries::get_order_by_code(&conn, code),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either id or orderCode is required".to_string(),
            ))
        }
    }
    .or_not_found(msg::ORDER_NOT_FOUND)?;

    Ok(Json(OrderLookupResponse {
        success: true,
        order: OrderSummary {
            id: order.id,
            order_code: order.order_code,
            status: order.status,
            total: order.total,
            items: order.items,
            payment_status: order.payment_status,
            created_at: order.created_at,
        },
    }))
}
