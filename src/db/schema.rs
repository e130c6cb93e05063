use rusqlite::Connection;

/// Initialize the storefront schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute_batch(
        r#"
        -- Catalog. Prices are VND integers; images and tags are JSON arrays.
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            long_description TEXT,
            price INTEGER NOT NULL,
            original_price INTEGER,
            weight TEXT,
            image TEXT,
            images TEXT NOT NULL DEFAULT '[]',
            category TEXT NOT NULL CHECK (category IN ('tea', 'teaware', 'gift')),
            type TEXT CHECK (type IS NULL OR type IN ('green', 'black', 'white', 'oolong', 'herbal')),
            origin TEXT,
            harvest TEXT,
            taste TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            in_stock INTEGER NOT NULL DEFAULT 1,
            featured INTEGER NOT NULL DEFAULT 0,
            rating REAL NOT NULL DEFAULT 0,
            reviews_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
        CREATE INDEX IF NOT EXISTS idx_products_featured ON products(featured);

        -- Loyalty club members.
        CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            full_name TEXT,
            phone TEXT,
            role TEXT NOT NULL DEFAULT 'customer' CHECK (role IN ('customer', 'admin', 'franchisee')),
            avatar_url TEXT,
            loyalty_points INTEGER NOT NULL DEFAULT 0,
            loyalty_tier TEXT NOT NULL DEFAULT 'bronze' CHECK (loyalty_tier IN ('bronze', 'silver', 'gold', 'diamond')),
            lifetime_points INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Points ledger.
        CREATE TABLE IF NOT EXISTS loyalty_transactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            amount INTEGER NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('purchase', 'bonus', 'redemption', 'expiry')),
            description TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_loyalty_transactions_user ON loyalty_transactions(user_id);

        -- Orders. order_code is the numeric id handed to the payment
        -- gateway; items and guest_info hold JSON.
        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY,
            order_code INTEGER NOT NULL UNIQUE,
            user_id TEXT REFERENCES profiles(id),
            guest_info TEXT,
            status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'processing', 'shipped', 'delivered', 'cancelled', 'refunded')),
            total INTEGER NOT NULL,
            items TEXT NOT NULL,
            payment_status TEXT NOT NULL DEFAULT 'pending' CHECK (payment_status IN ('pending', 'paid', 'failed', 'refunded')),
            payment_method TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status);
        CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id);

        -- Append-only payment audit trail.
        CREATE TABLE IF NOT EXISTS payment_logs (
            id TEXT PRIMARY KEY,
            event TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payment_logs_event ON payment_logs(event);

        CREATE TABLE IF NOT EXISTS franchise_applications (
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            location TEXT NOT NULL,
            investment_range TEXT,
            message TEXT,
            status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'reviewed', 'approved', 'rejected')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_franchise_status ON franchise_applications(status);

        CREATE TABLE IF NOT EXISTS contact_messages (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_initializes_twice() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();
    }

    #[test]
    fn status_checks_reject_unknown_values() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO orders (id, order_code, status, total, items, payment_status, created_at, updated_at)
             VALUES ('o1', 1, 'teleported', 1000, '[]', 'pending', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
