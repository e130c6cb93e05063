use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::{Json, Path, Query};
use crate::handlers::rate_limited;
use crate::models::Order;
use crate::orders::{next_action, OrderStatus, PaymentStatus};
use crate::util::client_ip;

use super::PageQuery;

/// Operator view of an order: the full row plus the state-machine hint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: String,
    pub order_code: i64,
    pub user_id: Option<String>,
    pub guest_info: Option<serde_json::Value>,
    pub status: OrderStatus,
    pub total: i64,
    pub items: serde_json::Value,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub next_action: &'static str,
}

impl From<Order> for AdminOrder {
    fn from(order: Order) -> Self {
        let hint = next_action(order.status, order.payment_status);
        Self {
            id: order.id,
            order_code: order.order_code,
            user_id: order.user_id,
            guest_info: order.guest_info,
            status: order.status,
            total: order.total,
            items: order.items,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            created_at: order.created_at,
            updated_at: order.updated_at,
            next_action: hint,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<AdminOrder>,
    pub count: i64,
}

pub async fn admin_list_orders(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|_| AppError::BadRequest(format!("Unknown status: {raw}")))?,
        ),
        None => None,
    };
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    };

    let conn = state.db.get()?;
    let (orders, count) = queries::list_orders(&conn, status, page.limit(), page.offset())?;
    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(AdminOrder::from).collect(),
        count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct OrderUpdatedResponse {
    pub success: bool,
    pub order: AdminOrder,
}

pub async fn admin_update_order_status(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<OrderUpdatedResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_mutations(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let raw = request
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
    let next: OrderStatus = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown status: {raw}")))?;

    let conn = state.db.get()?;
    let order = queries::get_order_by_id(&conn, &id).or_not_found(msg::ORDER_NOT_FOUND)?;

    if !order.status.can_transition_to(next) {
        return Err(AppError::Validation {
            error: msg::INVALID_STATUS_TRANSITION.to_string(),
            details: json!({"from": order.status, "to": next}),
        });
    }

    // Payment status follows the transition: a refunded delivery is a
    // refunded payment, and cancelling an unpaid order marks it failed.
    let payment_status = match next {
        OrderStatus::Refunded => Some(PaymentStatus::Refunded),
        OrderStatus::Cancelled
            if matches!(order.status, OrderStatus::Pending | OrderStatus::Processing)
                && order.payment_status == PaymentStatus::Pending =>
        {
            Some(PaymentStatus::Failed)
        }
        _ => None,
    };

    let updated = queries::update_order_status(&conn, &id, next, payment_status)?
        .or_not_found(msg::ORDER_NOT_FOUND)?;
    tracing::info!(
        order_code = updated.order_code,
        from = %order.status,
        to = %next,
        "order status updated"
    );
    Ok(Json(OrderUpdatedResponse {
        success: true,
        order: updated.into(),
    }))
}
