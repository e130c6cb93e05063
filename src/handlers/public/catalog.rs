use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::{AppError, OptionExt, Result, msg};
use crate::extractors::{Json, Path, Query};
use crate::handlers::rate_limited;
use crate::models::Product;
use crate::util::client_ip;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub tea_type: Option<String>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProductListQuery {
    fn into_filter(self) -> Result<queries::ProductFilter> {
        let category = match self.category.as_deref() {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| AppError::BadRequest(format!("Unknown category: {raw}")))?,
            ),
            None => None,
        };
        let tea_type = match self.tea_type.as_deref() {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| AppError::BadRequest(format!("Unknown type: {raw}")))?,
            ),
            None => None,
        };
        Ok(queries::ProductFilter {
            category,
            tea_type,
            featured: self.featured,
            in_stock: self.in_stock,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        })
    }
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    /// Unpaged total for the applied filter.
    pub count: i64,
}

pub async fn list_products(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let (products, count) = queries::list_products(&conn, &query.into_filter()?)?;
    Ok(Json(ProductListResponse { products, count }))
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

pub async fn get_product(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>> {
    let ip = client_ip(&headers, Some(peer));
    state
        .limiters
        .check_products(&ip)
        .map_err(rate_limited(msg::TOO_MANY_REQUESTS))?;

    let conn = state.db.get()?;
    let product =
        queries::get_product_by_slug(&conn, &slug).or_not_found(msg::PRODUCT_NOT_FOUND)?;
    Ok(Json(ProductResponse { product }))
}
