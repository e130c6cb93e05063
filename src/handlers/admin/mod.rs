mod franchise;
mod logs;
mod orders;
mod products;

pub use franchise::*;
pub use logs::*;
pub use orders::*;
pub use products::*;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Router,
};
use subtle::ConstantTimeEq;

use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::util::extract_bearer_token;

/// Bearer-token gate for the operator surface. Missing or malformed
/// Authorization is 401; a present-but-wrong token is 403, compared in
/// constant time.
pub async fn admin_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let token = extract_bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let expected = state.admin_token.as_bytes();
    let provided = token.as_bytes();
    if expected.is_empty()
        || expected.len() != provided.len()
        || !bool::from(expected.ct_eq(provided))
    {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/products",
            get(admin_list_products).post(admin_create_product),
        )
        .route(
            "/admin/products/{id}",
            put(admin_update_product).delete(admin_delete_product),
        )
        .route("/admin/orders", get(admin_list_orders))
        .route("/admin/orders/{id}/status", put(admin_update_order_status))
        .route("/admin/franchise", get(admin_list_franchise))
        .route(
            "/admin/franchise/{id}/status",
            put(admin_update_franchise_status),
        )
        .route("/admin/contact", get(admin_list_contact))
        .route("/admin/payment-logs", get(admin_list_payment_logs))
        .layer(middleware::from_fn_with_state(state, admin_auth))
}
