use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::{Result, msg};
use crate::extractors::{Json, Query};
use crate::handlers::rate_limited;
use crate::models::{ContactMessage, PaymentLog};
use crate::util::client_ip;

use super::PageQuery;

#[derive(Serialize)]
pub struct ContactListResponse {
    pub messages: Vec<ContactMessage>,
    pub count: i64,
}

pub async fn admin_list_contact(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<ContactListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let (messages, count) = queries::list_contact_messages(&conn, page.limit(), page.offset())?;
    Ok(Json(ContactListResponse { messages, count }))
}

#[derive(Debug, Deserialize)]
pub struct PaymentLogQuery {
    pub event: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct PaymentLogListResponse {
    pub logs: Vec<PaymentLog>,
    pub count: i64,
}

pub async fn admin_list_payment_logs(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<PaymentLogQuery>,
) -> Result<Json<PaymentLogListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let conn = state.db.get()?;
    let (logs, count) =
        queries::list_payment_logs(&conn, query.event.as_deref(), page.limit(), page.offset())?;
    Ok(Json(PaymentLogListResponse { logs, count }))
}
