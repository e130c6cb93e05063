//! teashop - backend for the 84tea storefront
//!
//! Single-binary axum service: product catalog, guest/member checkout via the
//! PayOS payment gateway, franchise applications, contact messages, and the
//! loyalty club. Persistence is embedded SQLite.

pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod id;
pub mod loyalty;
pub mod models;
pub mod orders;
pub mod payments;
pub mod rate_limit;
pub mod seed;
pub mod util;
pub mod validation;
