mod payos;

pub use payos::*;

use axum::{routing::get, Router};

use crate::db::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/payment/webhook",
        get(webhook_probe).post(handle_payos_webhook),
    )
}
