//! Identifier generation.
//!
//! Rows are keyed by uuid v4. Orders additionally carry a numeric order code
//! because PayOS requires an integer identifier (it must fit a JS safe
//! integer, max 9007199254740991).

use rand::Rng;
use uuid::Uuid;

/// New uuid v4 row id.
pub fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

/// Numeric order code: millisecond timestamp folded into 9 digits, times
/// 1000, plus a random 0..999 suffix. Stays well inside the JS safe-integer
/// range while keeping collisions across concurrent checkouts unlikely.
pub fn gen_order_code() -> i64 {
    let timestamp = chrono::Utc::now().timestamp_millis() % 1_000_000_000;
    let random = rand::thread_rng().gen_range(0..1000);
    timestamp * 1000 + random
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_ids_are_unique_uuids() {
        let a = gen_id();
        let b = gen_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn order_codes_are_positive_and_bounded() {
        for _ in 0..100 {
            let code = gen_order_code();
            assert!(code > 0);
            // 9 timestamp digits * 1000 + 3 random digits < 10^12,
            // far below the JS safe-integer ceiling.
            assert!(code < 1_000_000_000_000);
        }
    }

    #[test]
    fn order_codes_rarely_collide() {
        let codes: std::collections::HashSet<i64> = (0..50).map(|_| gen_order_code()).collect();
        // Same-millisecond duplicates are possible but random suffixes make
        // 50 identical draws implausible.
        assert!(codes.len() > 1);
    }
}
