use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::loyalty::LoyaltyTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Customer,
    Admin,
    Franchisee,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Franchisee => "franchisee",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "franchisee" => Ok(Self::Franchisee),
            _ => Err(()),
        }
    }
}

/// Loyalty club member. `loyalty_points` is the spendable balance and
/// drives the tier; `lifetime_points` only ever grows.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: ProfileRole,
    pub avatar_url: Option<String>,
    pub loyalty_points: i64,
    pub loyalty_tier: LoyaltyTier,
    pub lifetime_points: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTransactionType {
    Purchase,
    Bonus,
    Redemption,
    Expiry,
}

impl LoyaltyTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Bonus => "bonus",
            Self::Redemption => "redemption",
            Self::Expiry => "expiry",
        }
    }
}

impl fmt::Display for LoyaltyTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoyaltyTransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "bonus" => Ok(Self::Bonus),
            "redemption" => Ok(Self::Redemption),
            "expiry" => Ok(Self::Expiry),
            _ => Err(()),
        }
    }
}

/// Points ledger entry. Positive amounts accrue, negative amounts spend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTransaction {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: LoyaltyTransactionType,
    pub description: Option<String>,
    pub created_at: String,
}
