use chrono::Utc;
use rusqlite::{params, types::Value, Connection};

use crate::error::{AppError, Result};
use crate::id::gen_id;
use crate::loyalty;
use crate::models::*;
use crate::orders::{OrderStatus, PaymentStatus};

use super::from_row::{
    query_all, query_one, FromRow, CONTACT_COLS, FRANCHISE_COLS, LOYALTY_TRANSACTION_COLS,
    ORDER_COLS, PAYMENT_LOG_COLS, PRODUCT_COLS, PROFILE_COLS,
};

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Builder for dynamic UPDATE statements with optional fields.
struct UpdateBuilder {
    table: &'static str,
    id: String,
    fields: Vec<(&'static str, Value)>,
    track_updated_at: bool,
}

impl UpdateBuilder {
    fn new(table: &'static str, id: &str) -> Self {
        Self {
            table,
            id: id.to_string(),
            fields: Vec::new(),
            track_updated_at: false,
        }
    }

    fn with_updated_at(mut self) -> Self {
        self.track_updated_at = true;
        self
    }

    fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    fn set_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Execute the update and return the updated row, or None if the id
    /// matched nothing (or there was nothing to set).
    fn execute_returning<T: FromRow>(
        mut self,
        conn: &Connection,
        returning_cols: &str,
    ) -> Result<Option<T>> {
        if self.fields.is_empty() {
            return Ok(None);
        }
        if self.track_updated_at {
            self.fields.push(("updated_at", now().into()));
        }
        let sets: Vec<String> = self
            .fields
            .iter()
            .map(|(col, _)| format!("{} = ?", col))
            .collect();
        let mut values: Vec<Value> = self.fields.into_iter().map(|(_, v)| v).collect();
        values.push(self.id.into());
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING {}",
            self.table,
            sets.join(", "),
            returning_cols
        );
        use rusqlite::OptionalExtension;
        conn.query_row(&sql, rusqlite::params_from_iter(values), T::from_row)
            .optional()
            .map_err(Into::into)
    }
}

// ============ Products ============

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub tea_type: Option<TeaType>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// List catalog products newest first, plus the total count of rows
/// matching the filter (ignoring limit/offset).
pub fn list_products(conn: &Connection, filter: &ProductFilter) -> Result<(Vec<Product>, i64)> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(category) = filter.category {
        clauses.push("category = ?");
        values.push(category.to_string().into());
    }
    if let Some(tea_type) = filter.tea_type {
        clauses.push("type = ?");
        values.push(tea_type.to_string().into());
    }
    if let Some(featured) = filter.featured {
        clauses.push("featured = ?");
        values.push((featured as i32).into());
    }
    if let Some(in_stock) = filter.in_stock {
        clauses.push("in_stock = ?");
        values.push((in_stock as i32).into());
    }
    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM products{where_sql}"),
        rusqlite::params_from_iter(values.iter()),
        |row| row.get(0),
    )?;

    values.push(filter.limit.into());
    values.push(filter.offset.into());
    let sql = format!(
        "SELECT {PRODUCT_COLS} FROM products{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), Product::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((rows, count))
}

pub fn get_product_by_slug(conn: &Connection, slug: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {PRODUCT_COLS} FROM products WHERE slug = ?1"),
        &[&slug],
    )
}

pub fn get_product_by_id(conn: &Connection, id: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {PRODUCT_COLS} FROM products WHERE id = ?1"),
        &[&id],
    )
}

/// Fetch a batch of products by id in one query. Missing ids are simply
/// absent from the result.
pub fn get_products_by_ids(conn: &Connection, ids: &[String]) -> Result<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql =
        format!("SELECT {PRODUCT_COLS} FROM products WHERE id IN ({placeholders})");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(ids), Product::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Insert a catalog product. The input must already have passed
/// `validation::validate_product`; the slug defaults to a slugified name.
pub fn create_product(conn: &Connection, input: &ProductInput) -> Result<Product> {
    let name = input.name.clone().unwrap_or_default();
    let slug = input
        .slug
        .clone()
        .unwrap_or_else(|| crate::util::slugify(&name));
    if get_product_by_slug(conn, &slug)?.is_some() {
        return Err(AppError::Conflict(format!(
            "Product with slug '{slug}' already exists"
        )));
    }

    let product = Product {
        id: gen_id(),
        slug,
        name,
        description: input.description.clone(),
        long_description: input.long_description.clone(),
        price: input.price.unwrap_or_default(),
        original_price: input.original_price,
        weight: input.weight.clone(),
        image: input.image.clone(),
        images: input.images.clone().unwrap_or_default(),
        category: input
            .category
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ProductCategory::Tea),
        tea_type: input.tea_type.as_deref().and_then(|s| s.parse().ok()),
        origin: input.origin.clone(),
        harvest: input.harvest.clone(),
        taste: input.taste.clone(),
        tags: input.tags.clone().unwrap_or_default(),
        in_stock: input.in_stock.unwrap_or(true),
        featured: input.featured.unwrap_or(false),
        rating: 0.0,
        reviews_count: 0,
        created_at: now(),
        updated_at: now(),
    };
    insert_product(conn, &product)?;
    Ok(product)
}

fn insert_product(conn: &Connection, p: &Product) -> Result<()> {
    conn.execute(
        "INSERT INTO products (id, slug, name, description, long_description, price, original_price,
            weight, image, images, category, type, origin, harvest, taste, tags, in_stock, featured,
            rating, reviews_count, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
        params![
            p.id,
            p.slug,
            p.name,
            p.description,
            p.long_description,
            p.price,
            p.original_price,
            p.weight,
            p.image,
            serde_json::to_string(&p.images)?,
            p.category.as_str(),
            p.tea_type.map(|t| t.as_str()),
            p.origin,
            p.harvest,
            p.taste,
            serde_json::to_string(&p.tags)?,
            p.in_stock as i32,
            p.featured as i32,
            p.rating,
            p.reviews_count,
            p.created_at,
            p.updated_at,
        ],
    )?;
    Ok(())
}

pub fn update_product(
    conn: &Connection,
    id: &str,
    input: &ProductInput,
) -> Result<Option<Product>> {
    let images_json = match &input.images {
        Some(images) => Some(serde_json::to_string(images)?),
        None => None,
    };
    let tags_json = match &input.tags {
        Some(tags) => Some(serde_json::to_string(tags)?),
        None => None,
    };
    UpdateBuilder::new("products", id)
        .with_updated_at()
        .set_opt("slug", input.slug.clone())
        .set_opt("name", input.name.clone())
        .set_opt("description", input.description.clone())
        .set_opt("long_description", input.long_description.clone())
        .set_opt("price", input.price)
        .set_opt("original_price", input.original_price)
        .set_opt("weight", input.weight.clone())
        .set_opt("image", input.image.clone())
        .set_opt("images", images_json)
        .set_opt("category", input.category.clone())
        .set_opt("type", input.tea_type.clone())
        .set_opt("origin", input.origin.clone())
        .set_opt("harvest", input.harvest.clone())
        .set_opt("taste", input.taste.clone())
        .set_opt("tags", tags_json)
        .set_opt("in_stock", input.in_stock.map(|b| b as i32))
        .set_opt("featured", input.featured.map(|b| b as i32))
        .execute_returning(conn, PRODUCT_COLS)
}

pub fn delete_product(conn: &Connection, id: &str) -> Result<bool> {
    let affected = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Insert-or-update a launch product keyed by slug. Used by the seed
/// command, so re-running it refreshes content without duplicating rows.
pub fn upsert_product_by_slug(conn: &Connection, p: &Product) -> Result<()> {
    conn.execute(
        "INSERT INTO products (id, slug, name, description, long_description, price, original_price,
            weight, image, images, category, type, origin, harvest, taste, tags, in_stock, featured,
            rating, reviews_count, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
         ON CONFLICT(slug) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            long_description = excluded.long_description,
            price = excluded.price,
            original_price = excluded.original_price,
            weight = excluded.weight,
            image = excluded.image,
            images = excluded.images,
            category = excluded.category,
            type = excluded.type,
            origin = excluded.origin,
            harvest = excluded.harvest,
            taste = excluded.taste,
            tags = excluded.tags,
            in_stock = excluded.in_stock,
            featured = excluded.featured,
            rating = excluded.rating,
            reviews_count = excluded.reviews_count,
            updated_at = excluded.updated_at",
        params![
            p.id,
            p.slug,
            p.name,
            p.description,
            p.long_description,
            p.price,
            p.original_price,
            p.weight,
            p.image,
            serde_json::to_string(&p.images)?,
            p.category.as_str(),
            p.tea_type.map(|t| t.as_str()),
            p.origin,
            p.harvest,
            p.taste,
            serde_json::to_string(&p.tags)?,
            p.in_stock as i32,
            p.featured as i32,
            p.rating,
            p.reviews_count,
            p.created_at,
            p.updated_at,
        ],
    )?;
    Ok(())
}

// ============ Orders ============

/// Insert a pending order with a freshly generated numeric order code.
pub fn create_order(
    conn: &Connection,
    user_id: Option<&str>,
    guest_info: &serde_json::Value,
    total: i64,
    items: &serde_json::Value,
    payment_method: Option<&str>,
) -> Result<Order> {
    let order = Order {
        id: gen_id(),
        order_code: crate::id::gen_order_code(),
        user_id: user_id.map(str::to_string),
        guest_info: Some(guest_info.clone()),
        status: OrderStatus::Pending,
        total,
        items: items.clone(),
        payment_status: PaymentStatus::Pending,
        payment_method: payment_method.map(str::to_string),
        created_at: now(),
        updated_at: now(),
    };
    conn.execute(
        "INSERT INTO orders (id, order_code, user_id, guest_info, status, total, items,
            payment_status, payment_method, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            order.id,
            order.order_code,
            order.user_id,
            serde_json::to_string(guest_info)?,
            order.status.as_str(),
            order.total,
            serde_json::to_string(items)?,
            order.payment_status.as_str(),
            order.payment_method,
            order.created_at,
            order.updated_at,
        ],
    )?;
    Ok(order)
}

pub fn get_order_by_id(conn: &Connection, id: &str) -> Result<Option<Order>> {
    query_one(
        conn,
        &format!("SELECT {ORDER_COLS} FROM orders WHERE id = ?1"),
        &[&id],
    )
}

pub fn get_order_by_code(conn: &Connection, order_code: i64) -> Result<Option<Order>> {
    query_one(
        conn,
        &format!("SELECT {ORDER_COLS} FROM orders WHERE order_code = ?1"),
        &[&order_code],
    )
}

/// List orders newest first with an optional status filter, plus the total
/// count of matching rows.
pub fn list_orders(
    conn: &Connection,
    status: Option<OrderStatus>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Order>, i64)> {
    let (where_sql, count, mut values): (&str, i64, Vec<Value>) = match status {
        Some(status) => {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM orders WHERE status = ?1",
                params![status.as_str()],
                |row| row.get(0),
            )?;
            (" WHERE status = ?", count, vec![status.to_string().into()])
        }
        None => {
            let count =
                conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
            ("", count, Vec::new())
        }
    };
    values.push(limit.into());
    values.push(offset.into());
    let sql = format!(
        "SELECT {ORDER_COLS} FROM orders{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), Order::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((rows, count))
}

/// Set an order's status (and optionally its payment status), returning the
/// updated row.
pub fn update_order_status(
    conn: &Connection,
    id: &str,
    status: OrderStatus,
    payment_status: Option<PaymentStatus>,
) -> Result<Option<Order>> {
    UpdateBuilder::new("orders", id)
        .with_updated_at()
        .set("status", status.to_string())
        .set_opt("payment_status", payment_status.map(|p| p.to_string()))
        .execute_returning(conn, ORDER_COLS)
}

/// Atomically claim a webhook payment confirmation.
///
/// Re-reads the payment status inside the transaction so concurrent webhook
/// deliveries for the same order settle on exactly one winner. The winner
/// flips the order to paid/processing and, for member orders, accrues
/// loyalty points in the same transaction. Returns false when the order was
/// already paid.
pub fn try_mark_order_paid(conn: &mut Connection, order_code: i64) -> Result<bool> {
    let tx = conn.transaction()?;

    let current: Option<(String, String, Option<String>, i64)> = {
        use rusqlite::OptionalExtension;
        tx.query_row(
            "SELECT id, payment_status, user_id, total FROM orders WHERE order_code = ?1",
            params![order_code],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()?
    };
    let Some((id, payment_status, user_id, total)) = current else {
        return Err(AppError::NotFound(
            crate::error::msg::ORDER_NOT_FOUND.to_string(),
        ));
    };
    if payment_status == PaymentStatus::Paid.as_str() {
        return Ok(false);
    }

    tx.execute(
        "UPDATE orders SET payment_status = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            PaymentStatus::Paid.as_str(),
            OrderStatus::Processing.as_str(),
            now(),
            id
        ],
    )?;

    if let Some(user_id) = user_id {
        accrue_purchase_points(&tx, &user_id, total, order_code)?;
    }

    tx.commit()?;
    Ok(true)
}

// ============ Loyalty ============

/// Record a purchase accrual and bump the member's balances and tier.
/// Missing profiles are skipped so a stale user_id cannot block the payment.
fn accrue_purchase_points(
    conn: &Connection,
    user_id: &str,
    total: i64,
    order_code: i64,
) -> Result<()> {
    let points = loyalty::purchase_points(total);
    if points <= 0 {
        return Ok(());
    }
    let Some(profile) = get_profile(conn, user_id)? else {
        return Ok(());
    };

    conn.execute(
        "INSERT INTO loyalty_transactions (id, user_id, amount, type, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            gen_id(),
            user_id,
            points,
            LoyaltyTransactionType::Purchase.as_str(),
            loyalty::purchase_description(order_code),
            now(),
        ],
    )?;

    let balance = profile.loyalty_points + points;
    let lifetime = profile.lifetime_points + points;
    let tier = loyalty::tier_from_points(balance);
    conn.execute(
        "UPDATE profiles SET loyalty_points = ?1, lifetime_points = ?2,
            loyalty_tier = ?3, updated_at = ?4 WHERE id = ?5",
        params![balance, lifetime, tier.as_str(), now(), user_id],
    )?;
    Ok(())
}

pub fn get_profile(conn: &Connection, id: &str) -> Result<Option<Profile>> {
    query_one(
        conn,
        &format!("SELECT {PROFILE_COLS} FROM profiles WHERE id = ?1"),
        &[&id],
    )
}

pub fn create_profile(conn: &Connection, id: &str, full_name: &str) -> Result<Profile> {
    let profile = Profile {
        id: id.to_string(),
        full_name: Some(full_name.to_string()),
        phone: None,
        role: ProfileRole::Customer,
        avatar_url: None,
        loyalty_points: 0,
        loyalty_tier: loyalty::LoyaltyTier::Bronze,
        lifetime_points: 0,
        created_at: now(),
        updated_at: now(),
    };
    conn.execute(
        "INSERT INTO profiles (id, full_name, phone, role, avatar_url, loyalty_points,
            loyalty_tier, lifetime_points, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            profile.id,
            profile.full_name,
            profile.phone,
            profile.role.as_str(),
            profile.avatar_url,
            profile.loyalty_points,
            profile.loyalty_tier.as_str(),
            profile.lifetime_points,
            profile.created_at,
            profile.updated_at,
        ],
    )?;
    Ok(profile)
}

/// Recent ledger entries for a member, newest first.
pub fn list_loyalty_transactions(
    conn: &Connection,
    user_id: &str,
    limit: i64,
) -> Result<Vec<LoyaltyTransaction>> {
    query_all(
        conn,
        &format!(
            "SELECT {LOYALTY_TRANSACTION_COLS} FROM loyalty_transactions
             WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2"
        ),
        &[&user_id, &limit],
    )
}

// ============ Payment logs ============

pub fn log_payment_event(
    conn: &Connection,
    event: &str,
    data: &serde_json::Value,
) -> Result<()> {
    conn.execute(
        "INSERT INTO payment_logs (id, event, data, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![gen_id(), event, serde_json::to_string(data)?, now()],
    )?;
    Ok(())
}

pub fn list_payment_logs(
    conn: &Connection,
    event: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<PaymentLog>, i64)> {
    let (where_sql, count, mut values): (&str, i64, Vec<Value>) = match event {
        Some(event) => {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM payment_logs WHERE event = ?1",
                params![event],
                |row| row.get(0),
            )?;
            (" WHERE event = ?", count, vec![event.to_string().into()])
        }
        None => {
            let count =
                conn.query_row("SELECT COUNT(*) FROM payment_logs", [], |row| row.get(0))?;
            ("", count, Vec::new())
        }
    };
    values.push(limit.into());
    values.push(offset.into());
    let sql = format!(
        "SELECT {PAYMENT_LOG_COLS} FROM payment_logs{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), PaymentLog::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((rows, count))
}

// ============ Franchise applications ============

pub fn create_franchise_application(
    conn: &Connection,
    full_name: &str,
    email: &str,
    phone: &str,
    location: &str,
    investment_range: Option<&str>,
    message: Option<&str>,
) -> Result<FranchiseApplication> {
    let application = FranchiseApplication {
        id: gen_id(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
        investment_range: investment_range.map(str::to_string),
        message: message.map(str::to_string),
        status: ApplicationStatus::Pending,
        created_at: now(),
        updated_at: now(),
    };
    conn.execute(
        "INSERT INTO franchise_applications (id, full_name, email, phone, location,
            investment_range, message, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            application.id,
            application.full_name,
            application.email,
            application.phone,
            application.location,
            application.investment_range,
            application.message,
            application.status.as_str(),
            application.created_at,
            application.updated_at,
        ],
    )?;
    Ok(application)
}

pub fn list_franchise_applications(
    conn: &Connection,
    status: Option<ApplicationStatus>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<FranchiseApplication>, i64)> {
    let (where_sql, count, mut values): (&str, i64, Vec<Value>) = match status {
        Some(status) => {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM franchise_applications WHERE status = ?1",
                params![status.as_str()],
                |row| row.get(0),
            )?;
            (" WHERE status = ?", count, vec![status.to_string().into()])
        }
        None => {
            let count = conn.query_row("SELECT COUNT(*) FROM franchise_applications", [], |row| {
                row.get(0)
            })?;
            ("", count, Vec::new())
        }
    };
    values.push(limit.into());
    values.push(offset.into());
    let sql = format!(
        "SELECT {FRANCHISE_COLS} FROM franchise_applications{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(values),
            FranchiseApplication::from_row,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((rows, count))
}

pub fn update_franchise_status(
    conn: &Connection,
    id: &str,
    status: ApplicationStatus,
) -> Result<Option<FranchiseApplication>> {
    UpdateBuilder::new("franchise_applications", id)
        .with_updated_at()
        .set("status", status.to_string())
        .execute_returning(conn, FRANCHISE_COLS)
}

// ============ Contact messages ============

pub fn create_contact_message(
    conn: &Connection,
    name: &str,
    email: &str,
    phone: Option<&str>,
    subject: &str,
    message: &str,
) -> Result<ContactMessage> {
    let row = ContactMessage {
        id: gen_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        subject: subject.to_string(),
        message: message.to_string(),
        created_at: now(),
    };
    conn.execute(
        "INSERT INTO contact_messages (id, name, email, phone, subject, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.id, row.name, row.email, row.phone, row.subject, row.message, row.created_at
        ],
    )?;
    Ok(row)
}

pub fn list_contact_messages(
    conn: &Connection,
    limit: i64,
    offset: i64,
) -> Result<(Vec<ContactMessage>, i64)> {
    let count = conn.query_row("SELECT COUNT(*) FROM contact_messages", [], |row| row.get(0))?;
    let rows = query_all(
        conn,
        &format!(
            "SELECT {CONTACT_COLS} FROM contact_messages ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
        ),
        &[&limit, &offset],
    )?;
    Ok((rows, count))
}
