//! Row mapping trait and helpers shared by the query layer.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::*;

/// Parse a string column into an enum type, converting parse errors to
/// rusqlite errors instead of panicking on bad stored values.
fn parse_enum<T: std::str::FromStr>(row: &Row, col: usize, col_name: &str) -> rusqlite::Result<T> {
    row.get::<_, String>(col)?.parse::<T>().map_err(|_| {
        rusqlite::Error::InvalidColumnType(col, col_name.to_string(), rusqlite::types::Type::Text)
    })
}

/// Parse a JSON text column, falling back to the type default on bad data.
fn parse_json<T: serde::de::DeserializeOwned + Default>(row: &Row, col: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    Ok(serde_json::from_str(&raw).unwrap_or_default())
}

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const PRODUCT_COLS: &str = "id, slug, name, description, long_description, price, original_price, weight, image, images, category, type, origin, harvest, taste, tags, in_stock, featured, rating, reviews_count, created_at, updated_at";

pub const ORDER_COLS: &str = "id, order_code, user_id, guest_info, status, total, items, payment_status, payment_method, created_at, updated_at";

pub const PROFILE_COLS: &str = "id, full_name, phone, role, avatar_url, loyalty_points, loyalty_tier, lifetime_points, created_at, updated_at";

pub const LOYALTY_TRANSACTION_COLS: &str = "id, user_id, amount, type, description, created_at";

pub const PAYMENT_LOG_COLS: &str = "id, event, data, created_at";

pub const FRANCHISE_COLS: &str = "id, full_name, email, phone, location, investment_range, message, status, created_at, updated_at";

pub const CONTACT_COLS: &str = "id, name, email, phone, subject, message, created_at";

// ============ FromRow Implementations ============

impl FromRow for Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let tea_type: Option<TeaType> = row
            .get::<_, Option<String>>(11)?
            .and_then(|s| s.parse().ok());
        Ok(Product {
            id: row.get(0)?,
            slug: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            long_description: row.get(4)?,
            price: row.get(5)?,
            original_price: row.get(6)?,
            weight: row.get(7)?,
            image: row.get(8)?,
            images: parse_json(row, 9)?,
            category: parse_enum(row, 10, "category")?,
            tea_type,
            origin: row.get(12)?,
            harvest: row.get(13)?,
            taste: row.get(14)?,
            tags: parse_json(row, 15)?,
            in_stock: row.get::<_, i32>(16)? != 0,
            featured: row.get::<_, i32>(17)? != 0,
            rating: row.get(18)?,
            reviews_count: row.get(19)?,
            created_at: row.get(20)?,
            updated_at: row.get(21)?,
        })
    }
}

impl FromRow for Order {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let guest_info: Option<serde_json::Value> = row
            .get::<_, Option<String>>(3)?
            .and_then(|s| serde_json::from_str(&s).ok());
        let items: String = row.get(6)?;
        Ok(Order {
            id: row.get(0)?,
            order_code: row.get(1)?,
            user_id: row.get(2)?,
            guest_info,
            status: parse_enum(row, 4, "status")?,
            total: row.get(5)?,
            items: serde_json::from_str(&items).unwrap_or(serde_json::Value::Null),
            payment_status: parse_enum(row, 7, "payment_status")?,
            payment_method: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl FromRow for Profile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Profile {
            id: row.get(0)?,
            full_name: row.get(1)?,
            phone: row.get(2)?,
            role: parse_enum(row, 3, "role")?,
            avatar_url: row.get(4)?,
            loyalty_points: row.get(5)?,
            loyalty_tier: parse_enum(row, 6, "loyalty_tier")?,
            lifetime_points: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

impl FromRow for LoyaltyTransaction {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(LoyaltyTransaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            kind: parse_enum(row, 3, "type")?,
            description: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl FromRow for PaymentLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let data: String = row.get(2)?;
        Ok(PaymentLog {
            id: row.get(0)?,
            event: row.get(1)?,
            data: serde_json::from_str(&data).unwrap_or(serde_json::Value::Null),
            created_at: row.get(3)?,
        })
    }
}

impl FromRow for FranchiseApplication {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(FranchiseApplication {
            id: row.get(0)?,
            full_name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            location: row.get(4)?,
            investment_range: row.get(5)?,
            message: row.get(6)?,
            status: parse_enum(row, 7, "status")?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

impl FromRow for ContactMessage {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(ContactMessage {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            subject: row.get(4)?,
            message: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
