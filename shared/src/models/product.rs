//! Product Model
//!
//! The engine only needs the pricing-relevant projection of a product; the
//! full catalog entity (images, categories, options) lives server-side.

use serde::{Deserialize, Serialize};

/// Pricing projection of a catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    /// Regular unit price in currency unit
    pub original_price: f64,
    /// Units currently in stock
    pub current_stock: i64,
}
