use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::{Json, Path, Query};
use crate::handlers::public::{ProductListResponse, ProductResponse, SuccessResponse};
use crate::handlers::rate_limited;
use crate::models::ProductInput;
use crate::util::client_ip;
use crate::validation;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

pub async fn admin_list_products(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<ProductListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let filter = queries::ProductFilter {
        limit: page.limit(),
        offset: page.offset(),
        ..Default::default()
    };
    let (products, count) = queries::list_products(&conn, &filter)?;
    Ok(Json(ProductListResponse { products, count }))
}

pub async fn admin_create_product(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_mutations(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    validation::validate_product(&input, true).map_err(|details| AppError::Validation {
        error: msg::VALIDATION_FAILED.to_string(),
        details: json!(details),
    })?;

    let conn = state.db.get()?;
    let product = queries::create_product(&conn, &input)?;
    tracing::info!(slug = %product.slug, "product created");
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

pub async fn admin_update_product(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_mutations(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    validation::validate_product(&input, false).map_err(|details| AppError::Validation {
        error: msg::VALIDATION_FAILED.to_string(),
        details: json!(details),
    })?;

    let conn = state.db.get()?;
    if let Some(slug) = input.slug.as_deref() {
        if let Some(existing) = queries::get_product_by_slug(&conn, slug)? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Product with slug '{slug}' already exists"
                )));
            }
        }
    }

    let product = match queries::update_product(&conn, &id, &input)? {
        Some(product) => product,
        // Empty update: answer with the current row (or 404).
        None => queries::get_product_by_id(&conn, &id).or_not_found(msg::PRODUCT_NOT_FOUND)?,
    };
    Ok(Json(ProductResponse { product }))
}

pub async fn admin_delete_product(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_mutations(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    if !queries::delete_product(&conn, &id)? {
        return Err(AppError::NotFound(msg::PRODUCT_NOT_FOUND.to_string()));
    }
    Ok(Json(SuccessResponse { success: true }))
}
