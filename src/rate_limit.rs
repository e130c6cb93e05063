//! In-memory sliding-window rate limiting for the public API.
//!
//! Every bucket holds the timestamps of requests inside the current window;
//! entries expire individually, so quota frees up gradually instead of all at
//! once when a bucket resets. Limits are per client IP, with per-route key
//! prefixes so a burst against one endpoint cannot starve another.
//!
//! Configure via environment variables:
//! - RATE_LIMIT_PRODUCTS_RPM (default: 30)
//! - RATE_LIMIT_MUTATIONS_RPM (default: 10)
//! - RATE_LIMIT_CONTACT_RPM (default: 10)
//! - RATE_LIMIT_FRANCHISE_RPM (default: 5)
//! - RATE_LIMIT_LOOKUPS_RPM (default: 60)
//! - RATE_LIMIT_STRICT_LIMIT (default: 10) / RATE_LIMIT_STRICT_WINDOW_SECS
//!   (default: 900) for order creation and payment-link requests

use std::collections::{HashMap, VecDeque};
use std::env;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct RouteLimit {
    pub max_requests: u32,
    pub window: Duration,
}

impl RouteLimit {
    pub const fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub products: RouteLimit,
    pub mutations: RouteLimit,
    pub contact: RouteLimit,
    pub franchise: RouteLimit,
    pub orders: RouteLimit,
    pub payments: RouteLimit,
    pub lookups: RouteLimit,
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let strict = RouteLimit {
            max_requests: env_u32("RATE_LIMIT_STRICT_LIMIT", 10),
            window: Duration::from_secs(
                env_u32("RATE_LIMIT_STRICT_WINDOW_SECS", 900) as u64
            ),
        };
        Self {
            enabled: true,
            products: RouteLimit::per_minute(env_u32("RATE_LIMIT_PRODUCTS_RPM", 30)),
            mutations: RouteLimit::per_minute(env_u32("RATE_LIMIT_MUTATIONS_RPM", 10)),
            contact: RouteLimit::per_minute(env_u32("RATE_LIMIT_CONTACT_RPM", 10)),
            franchise: RouteLimit::per_minute(env_u32("RATE_LIMIT_FRANCHISE_RPM", 5)),
            orders: strict,
            payments: strict,
            lookups: RouteLimit::per_minute(env_u32("RATE_LIMIT_LOOKUPS_RPM", 60)),
        }
    }

    /// All checks pass. Used by the test suites that are not about limits.
    pub fn disabled() -> Self {
        let unlimited = RouteLimit::per_minute(u32::MAX);
        Self {
            enabled: false,
            products: unlimited,
            mutations: unlimited,
            contact: unlimited,
            franchise: unlimited,
            orders: unlimited,
            payments: unlimited,
            lookups: unlimited,
        }
    }
}

/// Per-key sliding window counter.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(limit: RouteLimit) -> Self {
        Self {
            max_requests: limit.max_requests,
            window: limit.window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request under `key`, or report how many seconds until the
    /// oldest in-window request expires. Denied requests are not recorded,
    /// so hammering a limited key does not extend the window.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets.entry(key.to_string()).or_default();

        while let Some(&oldest) = bucket.front() {
            if now.duration_since(oldest) >= self.window {
                bucket.pop_front();
            } else {
                break;
            }
        }

        if (bucket.len() as u64) < self.max_requests as u64 {
            bucket.push_back(now);
            return Ok(());
        }

        let retry_after = match bucket.front() {
            Some(&oldest) => {
                let remaining = (oldest + self.window).saturating_duration_since(now);
                let secs = remaining.as_secs();
                if remaining.subsec_nanos() > 0 {
                    secs + 1
                } else {
                    secs.max(1)
                }
            }
            // max_requests == 0: nothing ever expires, deny flat out
            None => self.window.as_secs().max(1),
        };
        Err(retry_after)
    }

    /// Drop buckets whose newest entry has aged out of the window.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        buckets.retain(|_, bucket| {
            bucket
                .back()
                .is_some_and(|&newest| now.duration_since(newest) < self.window)
        });
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.lock().unwrap().len()
    }
}

/// Per-route limiters held in `AppState`.
///
/// Key shapes mirror the route call sites: catalog and lookups key on the
/// bare IP, everything else prefixes the IP with the route family so the
/// quotas stay independent.
#[derive(Debug)]
pub struct RateLimiters {
    enabled: bool,
    products: SlidingWindowLimiter,
    mutations: SlidingWindowLimiter,
    contact: SlidingWindowLimiter,
    franchise: SlidingWindowLimiter,
    orders: SlidingWindowLimiter,
    payments: SlidingWindowLimiter,
    lookups: SlidingWindowLimiter,
}

impl RateLimiters {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            products: SlidingWindowLimiter::new(config.products),
            mutations: SlidingWindowLimiter::new(config.mutations),
            contact: SlidingWindowLimiter::new(config.contact),
            franchise: SlidingWindowLimiter::new(config.franchise),
            orders: SlidingWindowLimiter::new(config.orders),
            payments: SlidingWindowLimiter::new(config.payments),
            lookups: SlidingWindowLimiter::new(config.lookups),
        }
    }

    fn check(&self, limiter: &SlidingWindowLimiter, key: &str) -> Result<(), u64> {
        if !self.enabled {
            return Ok(());
        }
        limiter.check(key)
    }

    pub fn check_products(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.products, ip)
    }

    pub fn check_mutations(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.mutations, &format!("post:{ip}"))
    }

    pub fn check_contact(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.contact, &format!("contact:{ip}"))
    }

    pub fn check_franchise(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.franchise, &format!("franchise:{ip}"))
    }

    pub fn check_orders(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.orders, &format!("order:{ip}"))
    }

    pub fn check_payments(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.payments, &format!("payment:{ip}"))
    }

    pub fn check_lookups(&self, ip: &str) -> Result<(), u64> {
        self.check(&self.lookups, ip)
    }

    /// Called by the background task every 5 minutes.
    pub fn cleanup(&self) {
        self.products.cleanup();
        self.mutations.cleanup();
        self.contact.cleanup();
        self.franchise.cleanup();
        self.orders.cleanup();
        self.payments.cleanup();
        self.lookups.cleanup();
    }
}
