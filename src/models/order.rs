use serde::{Deserialize, Serialize};

use crate::orders::{OrderStatus, PaymentStatus};

/// Order row. `items` holds the revalidated cart as JSON, `guest_info` the
/// checkout contact details.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
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
}

/// Checkout payload. Fields stay optional at the type level so missing data
/// surfaces as field errors from `validation::validate_order` rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Option<Vec<OrderItemInput>>,
    pub total: Option<i64>,
    pub customer_info: Option<CustomerInfoInput>,
    pub payment_method: Option<String>,
    pub user_id: Option<String>,
}

/// A cart line as the client sent it. Only the product reference and
/// quantity are trusted; name and price are replaced from the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

impl OrderItemInput {
    /// Clients send either `productId` or `id`.
    pub fn product_ref(&self) -> Option<&str> {
        self.product_id.as_deref().or(self.id.as_deref())
    }
}

/// Payment-link request. `order_code` arrives as a JSON number and is kept
/// raw so non-integers surface as field errors, not deserialization noise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkRequest {
    pub order_code: Option<f64>,
    pub amount: Option<i64>,
    pub items: Option<Vec<OrderItemInput>>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub description: Option<String>,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfoInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub note: Option<String>,
}
