use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Wire-visible message strings. Clients and the storefront UI match on these,
/// so they are centralized here instead of scattered through handlers.
pub mod msg {
    pub const VALIDATION_FAILED: &str = "Validation failed";
    pub const CONTACT_VALIDATION_FAILED: &str = "Dữ liệu liên hệ không hợp lệ";
    pub const ORDER_NOT_FOUND: &str = "Order not found";
    pub const PRODUCT_NOT_FOUND: &str = "Product not found";
    pub const PROFILE_NOT_FOUND: &str = "Profile not found";
    pub const APPLICATION_NOT_FOUND: &str = "Application not found";
    pub const PRICE_MISMATCH: &str = "Price mismatch";
    pub const INVALID_WEBHOOK_PAYLOAD: &str = "Invalid webhook payload";
    pub const INVALID_SIGNATURE: &str = "Invalid signature";
    pub const PAYMENT_LINK_FAILED: &str = "Payment link creation failed";
    pub const INVALID_STATUS_TRANSITION: &str = "Invalid status transition";
    pub const TOO_MANY_REQUESTS: &str = "Too many requests";
    pub const CONTACT_TOO_MANY_REQUESTS: &str =
        "Bạn đã gửi quá nhiều yêu cầu. Vui lòng thử lại sau ít phút.";
    pub const FRANCHISE_TOO_MANY_REQUESTS: &str = "Too many requests. Please try again later.";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// 400 with a structured `details` object (field errors, transition info).
    #[error("{error}")]
    Validation {
        error: String,
        details: serde_json::Value,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    /// 429 with a `Retry-After` header. The message varies per route
    /// (the contact form answers in Vietnamese).
    #[error("{message}")]
    TooManyRequests { message: String, retry_after: u64 },

    /// Payment gateway failure. The message is wire-safe ("Payment link
    /// creation failed"), details stay in the logs.
    #[error("{0}")]
    Payment(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, retry_after) = match self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m, None, None),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m, None, None),
            AppError::Validation { error, details } => {
                (StatusCode::BAD_REQUEST, error, Some(details), None)
            }
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None, None)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string(), None, None),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m, None, None),
            AppError::TooManyRequests {
                message,
                retry_after,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                message,
                None,
                Some(retry_after),
            ),
            AppError::Payment(m) => {
                tracing::error!("Payment error: {}", m);
                (StatusCode::INTERNAL_SERVER_ERROR, m, None, None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Http(e) => {
                tracing::error!("HTTP client error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Internal(m) => {
                tracing::error!("Internal error: {}", m);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse { error, details });
        match retry_after {
            Some(secs) => (status, [(header::RETRY_AFTER, secs.to_string())], body)
                .into_response(),
            None => (status, body).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Turns `Ok(None)` lookups into 404s without a match block at every call site.
pub trait OptionExt<T> {
    fn or_not_found(self, message: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, message: &str) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}

impl<T> OptionExt<T> for Result<Option<T>> {
    fn or_not_found(self, message: &str) -> Result<T> {
        self?.or_not_found(message)
    }
}
