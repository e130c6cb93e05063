//! Hand-rolled request validation.
//!
//! Validators collect every problem into a field-error map instead of
//! stopping at the first one; the map serializes as the `details` object of
//! a 400 response. Lengths are counted in characters, not bytes, because
//! most of the content is Vietnamese.

use std::collections::HashMap;

use crate::models::*;

pub type FieldErrors = HashMap<&'static str, Vec<String>>;

const MAX_ORDER_ITEMS: usize = 50;
const MAX_QUANTITY: i64 = 99;
const MAX_PRODUCT_PRICE: i64 = 100_000_000;

fn push(errors: &mut FieldErrors, field: &'static str, message: impl Into<String>) {
    errors.entry(field).or_default().push(message.into());
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Minimal email shape check: one `@`, non-empty local part, domain with a
/// dot and no whitespace.
fn is_valid_email(s: &str) -> bool {
    if s.len() > 255 || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Vietnamese phone numbers: 10 or 11 digits, nothing else.
fn is_valid_phone(s: &str) -> bool {
    (10..=11).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn require_str_range(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
    label: &str,
) {
    match value.map(str::trim) {
        Some(v) if (min..=max).contains(&char_len(v)) => {}
        Some(_) => push(
            errors,
            field,
            format!("{label} must be between {min} and {max} characters"),
        ),
        None => push(errors, field, format!("{label} is required")),
    }
}

fn optional_max_len(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
    label: &str,
) {
    if let Some(v) = value {
        if char_len(v) > max {
            push(errors, field, format!("{label} must be at most {max} characters"));
        }
    }
}

// ============ Order ============

pub fn validate_order(req: &CreateOrderRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    match &req.items {
        Some(items) if !items.is_empty() && items.len() <= MAX_ORDER_ITEMS => {
            for (i, item) in items.iter().enumerate() {
                let n = i + 1;
                if item.product_ref().map(str::trim).unwrap_or_default().is_empty() {
                    push(&mut errors, "items", format!("Item {n}: product id is required"));
                }
                match item.quantity {
                    Some(q) if (1..=MAX_QUANTITY).contains(&q) => {}
                    _ => push(
                        &mut errors,
                        "items",
                        format!("Item {n}: quantity must be between 1 and {MAX_QUANTITY}"),
                    ),
                }
                match item.price {
                    Some(price) if price > 0 => {}
                    Some(_) => push(
                        &mut errors,
                        "items",
                        format!("Item {n}: price must be positive"),
                    ),
                    None => push(&mut errors, "items", format!("Item {n}: price is required")),
                }
            }
        }
        Some(_) => push(
            &mut errors,
            "items",
            format!("Order must contain between 1 and {MAX_ORDER_ITEMS} items"),
        ),
        None => push(&mut errors, "items", "Items are required"),
    }

    match req.total {
        Some(total) if total > 0 => {}
        Some(_) => push(&mut errors, "total", "Total must be positive"),
        None => push(&mut errors, "total", "Total is required"),
    }

    match &req.customer_info {
        Some(info) => validate_customer_info(&mut errors, info),
        None => push(&mut errors, "customerInfo", "Customer info is required"),
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_customer_info(errors: &mut FieldErrors, info: &CustomerInfoInput) {
    require_str_range(errors, "customerInfo.name", info.name.as_deref(), 2, 100, "Name");

    match info.phone.as_deref().map(str::trim) {
        Some(phone) if is_valid_phone(phone) => {}
        Some(_) => push(errors, "customerInfo.phone", "Phone must be 10-11 digits"),
        None => push(errors, "customerInfo.phone", "Phone is required"),
    }

    // Empty string is treated as "no email" (the checkout form sends "").
    if let Some(email) = info.email.as_deref().map(str::trim) {
        if !email.is_empty() && !is_valid_email(email) {
            push(errors, "customerInfo.email", "Email is invalid");
        }
    }

    match info.address.as_deref().map(str::trim) {
        Some(address) if char_len(address) >= 5 => {}
        Some(_) => push(
            errors,
            "customerInfo.address",
            "Address must be at least 5 characters",
        ),
        None => push(errors, "customerInfo.address", "Address is required"),
    }

    require_str_range(errors, "customerInfo.city", info.city.as_deref(), 2, 100, "City");
    optional_max_len(errors, "customerInfo.note", info.note.as_deref(), 500, "Note");
}

// ============ Contact ============

pub fn validate_contact(req: &ContactRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    require_str_range(&mut errors, "name", req.name.as_deref(), 2, 100, "Name");

    match req.email.as_deref().map(str::trim) {
        Some(email) if is_valid_email(email) => {}
        Some(_) => push(&mut errors, "email", "Email is invalid"),
        None => push(&mut errors, "email", "Email is required"),
    }

    if let Some(phone) = req.phone.as_deref().map(str::trim) {
        if !phone.is_empty() && !is_valid_phone(phone) {
            push(&mut errors, "phone", "Phone must be 10-11 digits");
        }
    }

    match req.subject.as_deref().map(str::trim) {
        Some(subject) if CONTACT_SUBJECTS.contains(&subject) => {}
        Some(_) => push(&mut errors, "subject", "Unknown subject"),
        None => push(&mut errors, "subject", "Subject is required"),
    }

    match req.message.as_deref().map(str::trim) {
        Some(message) if (10..=1000).contains(&char_len(message)) => {}
        Some(_) => push(
            &mut errors,
            "message",
            "Message must be between 10 and 1000 characters",
        ),
        None => push(&mut errors, "message", "Message is required"),
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ============ Franchise ============

pub fn validate_franchise(req: &FranchiseApplyRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    require_str_range(&mut errors, "fullName", req.full_name.as_deref(), 2, 100, "Full name");

    match req.email.as_deref().map(str::trim) {
        Some(email) if is_valid_email(email) => {}
        Some(_) => push(&mut errors, "email", "Email is invalid"),
        None => push(&mut errors, "email", "Email is required"),
    }

    match req.phone.as_deref().map(str::trim) {
        Some(phone) if is_valid_phone(phone) => {}
        Some(_) => push(&mut errors, "phone", "Phone must be 10-11 digits"),
        None => push(&mut errors, "phone", "Phone is required"),
    }

    require_str_range(&mut errors, "city", req.city.as_deref(), 2, 100, "City");

    optional_max_len(
        &mut errors,
        "preferredLocation",
        req.preferred_location.as_deref(),
        200,
        "Preferred location",
    );
    optional_max_len(
        &mut errors,
        "availableCapital",
        req.available_capital.as_deref(),
        100,
        "Available capital",
    );
    optional_max_len(&mut errors, "motivation", req.motivation.as_deref(), 2000, "Motivation");

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ============ Product (admin) ============

/// `creating` requires name/price/category; updates only validate what is
/// present.
pub fn validate_product(input: &ProductInput, creating: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    match input.name.as_deref().map(str::trim) {
        Some(name) if (2..=200).contains(&char_len(name)) => {}
        Some(_) => push(&mut errors, "name", "Name must be between 2 and 200 characters"),
        None if creating => push(&mut errors, "name", "Name is required"),
        None => {}
    }

    match input.price {
        Some(price) if (0..=MAX_PRODUCT_PRICE).contains(&price) => {}
        Some(_) => push(
            &mut errors,
            "price",
            format!("Price must be between 0 and {MAX_PRODUCT_PRICE}"),
        ),
        None if creating => push(&mut errors, "price", "Price is required"),
        None => {}
    }

    match input.category.as_deref().map(str::trim) {
        Some(category) if category.parse::<ProductCategory>().is_ok() => {}
        Some(_) => push(&mut errors, "category", "Category must be one of tea, teaware, gift"),
        None if creating => push(&mut errors, "category", "Category is required"),
        None => {}
    }

    if let Some(tea_type) = input.tea_type.as_deref().map(str::trim) {
        if tea_type.parse::<TeaType>().is_err() {
            push(
                &mut errors,
                "type",
                "Type must be one of green, black, white, oolong, herbal",
            );
        }
    }

    if let Some(slug) = input.slug.as_deref().map(str::trim) {
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            push(&mut errors, "slug", "Slug must be lowercase letters, digits and hyphens");
        }
    }

    if let Some(image) = input.image.as_deref().map(str::trim) {
        // Seeded products use emoji placeholders, so only URL-looking
        // values are checked.
        if image.contains("://") && reqwest::Url::parse(image).is_err() {
            push(&mut errors, "image", "Image must be a valid URL");
        }
    }

    optional_max_len(&mut errors, "description", input.description.as_deref(), 2000, "Description");
    optional_max_len(
        &mut errors,
        "long_description",
        input.long_description.as_deref(),
        2000,
        "Long description",
    );
    optional_max_len(&mut errors, "weight", input.weight.as_deref(), 50, "Weight");
    optional_max_len(&mut errors, "origin", input.origin.as_deref(), 200, "Origin");

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ============ Payment link ============

/// Validates the request and returns the order code as an integer.
pub fn validate_payment_link(req: &PaymentLinkRequest) -> Result<i64, FieldErrors> {
    let mut errors = FieldErrors::new();

    let order_code = match req.order_code {
        Some(code) if code > 0.0 && code.fract() == 0.0 && code <= 9_007_199_254_740_991.0 => {
            Some(code as i64)
        }
        Some(_) => {
            push(&mut errors, "orderCode", "Order code must be a positive integer");
            None
        }
        None => {
            push(&mut errors, "orderCode", "Order code is required");
            None
        }
    };

    match &req.items {
        Some(items) if !items.is_empty() => {
            for (i, item) in items.iter().enumerate() {
                let n = i + 1;
                if item.product_ref().map(str::trim).unwrap_or_default().is_empty() {
                    push(&mut errors, "items", format!("Item {n}: product id is required"));
                }
                match item.quantity {
                    Some(q) if q >= 1 => {}
                    _ => push(&mut errors, "items", format!("Item {n}: quantity must be at least 1")),
                }
                if let Some(price) = item.price {
                    if price <= 0 {
                        push(&mut errors, "items", format!("Item {n}: price must be positive"));
                    }
                }
            }
        }
        _ => push(&mut errors, "items", "Items are required"),
    }

    for (field, value) in [("returnUrl", &req.return_url), ("cancelUrl", &req.cancel_url)] {
        match value.as_deref().map(str::trim) {
            Some(url) if reqwest::Url::parse(url).is_ok() => {}
            Some(_) => push(&mut errors, field, "Must be a valid URL"),
            None => push(&mut errors, field, "Required"),
        }
    }

    if let Some(amount) = req.amount {
        if amount <= 0 {
            push(&mut errors, "amount", "Amount must be positive");
        }
    }

    match order_code {
        Some(code) if errors.is_empty() => Ok(code),
        _ => Err(errors),
    }
}

// ============ Webhook ============

/// Shape-checked webhook envelope. `data` keeps every field it arrived
/// with; the canonical signature string is built over all of them.
#[derive(Debug, Clone)]
pub struct WebhookEnvelope {
    pub code: String,
    pub desc: String,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub signature: String,
    pub order_code: i64,
    pub amount: i64,
}

/// Returns None when the payload does not match the PayOS webhook shape.
pub fn validate_webhook(payload: &serde_json::Value) -> Option<WebhookEnvelope> {
    let obj = payload.as_object()?;
    let code = obj.get("code")?.as_str()?.to_string();
    let desc = obj.get("desc")?.as_str()?.to_string();
    let signature = obj.get("signature")?.as_str()?.to_string();
    let data = obj.get("data")?.as_object()?.clone();
    let order_code = data.get("orderCode")?.as_i64()?;
    let amount = data.get("amount")?.as_i64()?;
    Some(WebhookEnvelope {
        code,
        desc,
        data,
        signature,
        order_code,
        amount,
    })
}
