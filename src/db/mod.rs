pub mod from_row;
pub mod queries;
mod schema;

pub use schema::init_db;

use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::payments::PayOsClient;
use crate::rate_limit::RateLimiters;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    /// Public base URL, used for payment return/cancel links.
    pub base_url: String,
    pub payos: PayOsClient,
    /// Bearer token for the admin surface.
    pub admin_token: String,
    pub limiters: Arc<RateLimiters>,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    Pool::builder().max_size(10).build(manager)
}
