//! Server-side cart revalidation.
//!
//! Client carts are never trusted: every line is re-resolved against the
//! catalog in one batch query, and the server's id/name/price replace
//! whatever the client sent. Only the quantity survives.

use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

use crate::db::queries;
use crate::error::AppError;
use crate::models::OrderItemInput;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Product with ID {0} not found.")]
    ProductNotFound(String),

    #[error("Product {0} is out of stock.")]
    OutOfStock(String),

    #[error("Cart is empty.")]
    Empty,

    #[error("database error: {0}")]
    Database(String),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Database(message) => AppError::Internal(message),
            other => AppError::BadRequest(format!("Cart is invalid or unavailable: {other}")),
        }
    }
}

/// A cart line after revalidation, priced by the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Resolve cart lines against the catalog in a single batch query.
pub fn validate_cart_items(
    conn: &Connection,
    items: &[OrderItemInput],
) -> Result<Vec<ValidatedItem>, CartError> {
    if items.is_empty() {
        return Err(CartError::Empty);
    }

    let ids: Vec<String> = items
        .iter()
        .filter_map(|item| item.product_ref())
        .map(str::to_string)
        .collect();
    let products = queries::get_products_by_ids(conn, &ids)
        .map_err(|e| CartError::Database(e.to_string()))?;

    items
        .iter()
        .map(|item| {
            let id = item.product_ref().unwrap_or_default();
            let product = products
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| CartError::ProductNotFound(id.to_string()))?;
            if !product.in_stock {
                return Err(CartError::OutOfStock(product.name.clone()));
            }
            Ok(ValidatedItem {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: item.quantity.unwrap_or(1),
                image: product.image.clone(),
            })
        })
        .collect()
}

/// Order total from server prices.
pub fn order_total(items: &[ValidatedItem]) -> i64 {
    items.iter().map(|item| item.price * item.quantity).sum()
}
