pub mod admin;
pub mod public;
pub mod webhooks;

use crate::error::AppError;

/// Map a limiter denial to the 429 envelope for a route family.
pub(crate) fn rate_limited(message: &str) -> impl Fn(u64) -> AppError + '_ {
    move |retry_after| AppError::TooManyRequests {
        message: message.to_string(),
        retry_after,
    }
}
