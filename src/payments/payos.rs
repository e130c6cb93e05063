//! PayOS payment gateway client and webhook signature verification.
//!
//! Both directions are HMAC-SHA256 signed with the merchant checksum key:
//! outgoing payment-link requests sign a fixed five-field string, incoming
//! webhooks sign the `data` object canonicalized by sorted keys.

use std::env;

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<sha2::Sha256>;

const DEFAULT_API_BASE: &str = "https://api-merchant.payos.vn";

/// PayOS item names are capped at 50 characters.
const MAX_ITEM_NAME_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct PayOsConfig {
    pub client_id: String,
    pub api_key: String,
    pub checksum_key: String,
    pub api_base: String,
}

impl PayOsConfig {
    /// Read credentials from PAYOS_CLIENT_ID / PAYOS_API_KEY /
    /// PAYOS_CHECKSUM_KEY. PAYOS_API_BASE overrides the endpoint, which the
    /// integration tests point at a local mock.
    pub fn from_env() -> Self {
        Self {
            client_id: env::var("PAYOS_CLIENT_ID").unwrap_or_default(),
            api_key: env::var("PAYOS_API_KEY").unwrap_or_default(),
            checksum_key: env::var("PAYOS_CHECKSUM_KEY").unwrap_or_default(),
            api_base: env::var("PAYOS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentLinkItem {
    pub name: String,
    pub quantity: i64,
    pub price: i64,
}

impl PaymentLinkItem {
    pub fn new(name: &str, quantity: i64, price: i64) -> Self {
        Self {
            name: name.chars().take(MAX_ITEM_NAME_CHARS).collect(),
            quantity,
            price,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePaymentLink {
    pub order_code: i64,
    pub amount: i64,
    pub description: String,
    pub items: Vec<PaymentLinkItem>,
    pub return_url: String,
    pub cancel_url: String,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
}

/// Successful payment-request response data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub checkout_url: String,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub payment_link_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequestBody<'a> {
    order_code: i64,
    amount: i64,
    description: &'a str,
    items: &'a [PaymentLinkItem],
    return_url: &'a str,
    cancel_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer_phone: Option<&'a str>,
    signature: String,
}

#[derive(Debug, Deserialize)]
struct PaymentRequestResponse {
    code: String,
    desc: String,
    data: Option<PaymentLink>,
}

#[derive(Debug, Clone)]
pub struct PayOsClient {
    client: Client,
    config: PayOsConfig,
}

impl PayOsClient {
    pub fn new(config: PayOsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn checksum_key(&self) -> &str {
        &self.config.checksum_key
    }

    /// Create a hosted checkout link. `code == "00"` is the gateway's only
    /// success code; anything else surfaces as a payment error carrying the
    /// gateway's description.
    pub async fn create_payment_link(&self, request: &CreatePaymentLink) -> Result<PaymentLink> {
        let signature = request_signature(
            &self.config.checksum_key,
            request.amount,
            &request.cancel_url,
            &request.description,
            request.order_code,
            &request.return_url,
        );
        let body = PaymentRequestBody {
            order_code: request.order_code,
            amount: request.amount,
            description: &request.description,
            items: &request.items,
            return_url: &request.return_url,
            cancel_url: &request.cancel_url,
            buyer_name: request.buyer_name.as_deref(),
            buyer_email: request.buyer_email.as_deref(),
            buyer_phone: request.buyer_phone.as_deref(),
            signature,
        };

        let response = self
            .client
            .post(format!("{}/v2/payment-requests", self.config.api_base))
            .header("x-client-id", &self.config.client_id)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?
            .json::<PaymentRequestResponse>()
            .await?;

        if response.code != "00" {
            return Err(AppError::Payment(format!(
                "PayOS rejected payment request {}: {} ({})",
                request.order_code, response.desc, response.code
            )));
        }
        response.data.ok_or_else(|| {
            AppError::Payment(format!(
                "PayOS success response for {} carried no data",
                request.order_code
            ))
        })
    }
}

/// Signature over the five core payment fields, in PayOS's fixed
/// alphabetical order.
fn request_signature(
    checksum_key: &str,
    amount: i64,
    cancel_url: &str,
    description: &str,
    order_code: i64,
    return_url: &str,
) -> String {
    let payload = format!(
        "amount={amount}&cancelUrl={cancel_url}&description={description}&orderCode={order_code}&returnUrl={return_url}"
    );
    hmac_hex(checksum_key, &payload)
}

/// Canonical form of a webhook `data` object: keys sorted alphabetically,
/// `key=value` pairs joined with `&`. Scalars render as their JSON display
/// form (`null` included); nested values render as compact JSON.
fn canonicalize(data: &serde_json::Map<String, serde_json::Value>) -> String {
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();
    let pairs: Vec<String> = keys
        .into_iter()
        .map(|key| {
            let value = &data[key];
            let rendered = match value {
                serde_json::Value::Null => "null".to_string(),
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => serde_json::to_string(other).unwrap_or_default(),
            };
            format!("{key}={rendered}")
        })
        .collect();
    pairs.join("&")
}

fn hmac_hex(key: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Sign a webhook `data` object the way PayOS does. Used to produce
/// fixtures in tests.
pub fn sign_webhook_data(
    data: &serde_json::Map<String, serde_json::Value>,
    checksum_key: &str,
) -> String {
    hmac_hex(checksum_key, &canonicalize(data))
}

/// Constant-time webhook signature check. A length mismatch (including an
/// empty signature) is a clean false.
pub fn verify_webhook_signature(
    data: &serde_json::Map<String, serde_json::Value>,
    signature: &str,
    checksum_key: &str,
) -> bool {
    let expected = sign_webhook_data(data, checksum_key);
    let expected = expected.as_bytes();
    let provided = signature.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(provided).into()
}
