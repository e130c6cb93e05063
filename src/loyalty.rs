//! Loyalty club tiers and point accrual.
//!
//! Tier thresholds: bronze 0-999, silver 1000-4999, gold 5000-14999,
//! diamond 15000+. Purchases accrue 1 point per 1,000 VND of the paid total,
//! applied inside the payment-success transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// VND spent per loyalty point.
const POINTS_DIVISOR: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl LoyaltyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }

    /// Minimum points for this tier.
    pub fn min_points(&self) -> i64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 1000,
            Self::Gold => 5000,
            Self::Diamond => 15000,
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoyaltyTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "diamond" => Ok(Self::Diamond),
            _ => Err(()),
        }
    }
}

pub fn tier_from_points(points: i64) -> LoyaltyTier {
    if points >= 15000 {
        LoyaltyTier::Diamond
    } else if points >= 5000 {
        LoyaltyTier::Gold
    } else if points >= 1000 {
        LoyaltyTier::Silver
    } else {
        LoyaltyTier::Bronze
    }
}

/// The tier above `current`, or None at diamond.
pub fn next_tier(current: LoyaltyTier) -> Option<LoyaltyTier> {
    match current {
        LoyaltyTier::Bronze => Some(LoyaltyTier::Silver),
        LoyaltyTier::Silver => Some(LoyaltyTier::Gold),
        LoyaltyTier::Gold => Some(LoyaltyTier::Diamond),
        LoyaltyTier::Diamond => None,
    }
}

/// Points still needed to reach the next tier; 0 at diamond.
pub fn points_to_next_tier(points: i64, current: LoyaltyTier) -> i64 {
    match next_tier(current) {
        Some(next) => (next.min_points() - points).max(0),
        None => 0,
    }
}

/// Progress through the current tier as a percentage, clamped to 0-100.
/// Diamond is always 100.
pub fn tier_progress(points: i64, current: LoyaltyTier) -> f64 {
    let Some(next) = next_tier(current) else {
        return 100.0;
    };
    let current_min = current.min_points();
    let range = (next.min_points() - current_min) as f64;
    let progress = (points - current_min) as f64;
    (progress / range * 100.0).clamp(0.0, 100.0)
}

/// Points awarded for a paid order total (integer division).
pub fn purchase_points(total: i64) -> i64 {
    total / POINTS_DIVISOR
}

/// Ledger description for a purchase accrual.
pub fn purchase_description(order_code: i64) -> String {
    format!("Đơn hàng #{order_code}")
}
