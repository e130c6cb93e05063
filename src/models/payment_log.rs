use serde::Serialize;

/// Append-only payment audit row. `event` is one of the
/// `payments::events` constants, `data` the event payload as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentLog {
    pub id: String,
    pub event: String,
    pub data: serde_json::Value,
    pub created_at: String,
}
