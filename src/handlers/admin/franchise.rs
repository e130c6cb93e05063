use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::{Json, Path, Query};
use crate::handlers::rate_limited;
use crate::models::{ApplicationStatus, FranchiseApplication};
use crate::util::client_ip;

use super::PageQuery;

#[derive(Debug, Deserialize)]
pub struct FranchiseListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct FranchiseListResponse {
    pub applications: Vec<FranchiseApplication>,
    pub count: i64,
}

pub async fn admin_list_franchise(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<FranchiseListQuery>,
) -> Result<Json<FranchiseListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<ApplicationStatus>()
                .map_err(|_| AppError::BadRequest(format!("Unknown status: {raw}")))?,
        ),
        None => None,
    };

    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let conn = state.db.get()?;
    let (applications, count) =
        queries::list_franchise_applications(&conn, status, page.limit(), page.offset())?;
    Ok(Json(FranchiseListResponse {
        applications,
        count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct FranchiseStatusRequest {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct FranchiseUpdatedResponse {
    pub success: bool,
    pub application: FranchiseApplication,
}

pub async fn admin_update_franchise_status(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<FranchiseStatusRequest>,
) -> Result<Json<FranchiseUpdatedResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_mutations(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let raw = request
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
    let status: ApplicationStatus = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown status: {raw}")))?;

    let conn = state.db.get()?;
    let application = queries::update_franchise_status(&conn, &id, status)
        .or_not_found(msg::APPLICATION_NOT_FOUND)?;
    Ok(Json(FranchiseUpdatedResponse {
        success: true,
        application,
    }))
}
