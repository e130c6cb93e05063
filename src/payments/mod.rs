mod payos;

pub use payos::{
    sign_webhook_data, verify_webhook_signature, CreatePaymentLink, PayOsClient, PayOsConfig,
    PaymentLink, PaymentLinkItem,
};

/// Payment audit event names written to `payment_logs`.
pub mod events {
    pub const PAYMENT_CREATED: &str = "payment_created";
    pub const PAYMENT_FAILED: &str = "payment_failed";
    pub const WEBHOOK_RECEIVED: &str = "webhook_received";
    pub const WEBHOOK_DUPLICATE: &str = "webhook_duplicate";
}
