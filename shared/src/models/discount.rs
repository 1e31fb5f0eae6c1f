//! Discount Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored discount status
///
/// Note: the *effective* status shown to operators is derived at read time
/// from this value plus the datetime window (see `plaza-client`); it is
/// never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStatus {
    #[default]
    Active,
    Inactive,
    Paused,
    Expired,
}

impl std::fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiscountStatus::Active => "active",
            DiscountStatus::Inactive => "inactive",
            DiscountStatus::Paused => "paused",
            DiscountStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// A product entry inside a discount - independently priced, a discount does
/// not apply a single percentage uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountProduct {
    pub product_id: String,
    /// Discounted unit price in currency unit; always below the product's
    /// original price (enforced at save time)
    pub discounted_price: f64,
    /// Units sellable under the discount; None = unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_limit: Option<i64>,
    /// Units a single customer may buy; None = unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_limit: Option<i64>,
}

/// Discount entity
///
/// Datetimes are entered as local wall-clock and persisted as UTC instants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    pub id: String,
    pub business_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
    pub status: DiscountStatus,
    pub applicable_products: Vec<DiscountProduct>,
}

/// Create discount payload (`POST /discounts`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub business_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub applicable_products: Vec<DiscountProduct>,
}

/// Update discount payload (`PATCH /discounts/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiscountUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub status: Option<DiscountStatus>,
    pub applicable_products: Option<Vec<DiscountProduct>>,
}
