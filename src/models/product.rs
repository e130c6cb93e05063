use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Tea,
    Teaware,
    Gift,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tea => "tea",
            Self::Teaware => "teaware",
            Self::Gift => "gift",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tea" => Ok(Self::Tea),
            "teaware" => Ok(Self::Teaware),
            "gift" => Ok(Self::Gift),
            _ => Err(()),
        }
    }
}

/// Tea style, set only on `category = tea` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeaType {
    Green,
    Black,
    White,
    Oolong,
    Herbal,
}

impl TeaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Black => "black",
            Self::White => "white",
            Self::Oolong => "oolong",
            Self::Herbal => "herbal",
        }
    }
}

impl fmt::Display for TeaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Self::Green),
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            "oolong" => Ok(Self::Oolong),
            "herbal" => Ok(Self::Herbal),
            _ => Err(()),
        }
    }
}

/// Catalog row. Prices are VND integers.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: i64,
    pub original_price: Option<i64>,
    pub weight: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub category: ProductCategory,
    #[serde(rename = "type")]
    pub tea_type: Option<TeaType>,
    pub origin: Option<String>,
    pub harvest: Option<String>,
    pub taste: Option<String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub rating: f64,
    pub reviews_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin create/update payload. Everything is optional at the type level;
/// `validation::validate_product` enforces what a create actually requires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductInput {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub weight: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub tea_type: Option<String>,
    pub origin: Option<String>,
    pub harvest: Option<String>,
    pub taste: Option<String>,
    pub tags: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}
