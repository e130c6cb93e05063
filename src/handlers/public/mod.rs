mod catalog;
mod club;
mod contact;
mod orders;
mod payment;

pub use catalog::*;
pub use club::*;
pub use contact::*;
pub use orders::*;
pub use payment::*;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/{slug}", get(get_product))
        .route("/orders", post(create_order).get(get_order))
        .route("/payment/create-link", post(create_payment_link))
        .route("/contact", post(submit_contact))
        .route("/franchise/apply", post(apply_franchise))
        .route("/club/profile/{user_id}", get(club_profile))
}
