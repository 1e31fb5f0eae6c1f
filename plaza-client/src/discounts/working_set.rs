//! Discount working set and batch apply
//!
//! The working set is the ephemeral, session-scoped projection of the
//! products selected for a discount. It is owned exclusively by the editing
//! session and discarded on submit or cancel; nothing here touches the
//! network or the persisted discount.

use crate::discounts::pricing::PricePair;
use crate::error::{EngineError, EngineResult};
use shared::models::{DiscountProduct, ProductInfo};

/// One editable product projection inside a discount session
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingEntry {
    pub product_id: String,
    pub name: String,
    pub current_stock: i64,
    pub price: PricePair,
    /// Last entered stock ceiling; kept even while the no-limit flag is set
    /// so re-enabling the limit restores it
    pub stock_limit: Option<i64>,
    pub purchase_limit: Option<i64>,
    pub no_stock_limit: bool,
    pub no_purchase_limit: bool,
}

impl WorkingEntry {
    pub fn from_product(product: &ProductInfo) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            current_stock: product.current_stock,
            price: PricePair::new(product.original_price),
            stock_limit: None,
            purchase_limit: None,
            no_stock_limit: true,
            no_purchase_limit: true,
        }
    }

    /// Rebuild an entry from a persisted discount product and its catalog
    /// record, restoring the price pair and limit flags for re-editing
    pub fn from_persisted(product: &ProductInfo, persisted: &DiscountProduct) -> Self {
        let mut price = PricePair::new(product.original_price);
        price.set_discounted_price(persisted.discounted_price);
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            current_stock: product.current_stock,
            price,
            stock_limit: persisted.stock_limit,
            purchase_limit: persisted.purchase_limit,
            no_stock_limit: persisted.stock_limit.is_none(),
            no_purchase_limit: persisted.purchase_limit.is_none(),
        }
    }

    /// Stock ceiling in effect, None when unlimited
    pub fn effective_stock_limit(&self) -> Option<i64> {
        if self.no_stock_limit { None } else { self.stock_limit }
    }

    pub fn effective_purchase_limit(&self) -> Option<i64> {
        if self.no_purchase_limit { None } else { self.purchase_limit }
    }

    /// The persisted shape submitted to the service
    pub fn to_discount_product(&self) -> DiscountProduct {
        DiscountProduct {
            product_id: self.product_id.clone(),
            discounted_price: self.price.discounted_price(),
            stock_limit: self.effective_stock_limit(),
            purchase_limit: self.effective_purchase_limit(),
        }
    }
}

/// How a batch update treats a limit field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitMode {
    /// Leave the field as each entry has it
    NoUpdate,
    /// Clear the limit on every targeted entry
    NoLimit,
    /// Assign the shared value to every targeted entry
    SetLimit(i64),
}

/// A bulk edit over the working set
#[derive(Debug, Clone, Copy)]
pub struct BatchUpdate {
    /// Shared discount percentage; only applied when > 0
    pub percentage: f64,
    pub stock_limit: LimitMode,
    pub purchase_limit: LimitMode,
}

/// Ordered working set for one discount-edit session
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    entries: Vec<WorkingEntry>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: &[ProductInfo]) -> Self {
        Self {
            entries: products.iter().map(WorkingEntry::from_product).collect(),
        }
    }

    /// Rebuild the working set from persisted discount products, in their
    /// persisted order, matching each against the product catalog
    ///
    /// Entries whose product is no longer in the catalog are skipped; they
    /// cannot be re-edited without an original price and current stock.
    pub fn from_persisted(persisted: &[DiscountProduct], catalog: &[ProductInfo]) -> Self {
        let entries = persisted
            .iter()
            .filter_map(|p| {
                catalog
                    .iter()
                    .find(|c| c.id == p.product_id)
                    .map(|c| WorkingEntry::from_persisted(c, p))
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WorkingEntry] {
        &self.entries
    }

    pub fn get(&self, product_id: &str) -> Option<&WorkingEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    pub fn get_mut(&mut self, product_id: &str) -> Option<&mut WorkingEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }

    /// Add a product to the selection; adding an already-present id is a
    /// no-op so re-selection cannot duplicate entries.
    pub fn add_product(&mut self, product: &ProductInfo) {
        if self.get(&product.id).is_none() {
            self.entries.push(WorkingEntry::from_product(product));
        }
    }

    pub fn remove_product(&mut self, product_id: &str) {
        self.entries.retain(|e| e.product_id != product_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a bulk edit to the targeted entries
    ///
    /// An empty `target_ids` targets the whole set; otherwise only the named
    /// entries are touched. The operation is atomic: an unknown target id
    /// fails the whole batch before any entry is mutated.
    pub fn apply_batch(&mut self, target_ids: &[String], update: BatchUpdate) -> EngineResult<()> {
        let targets: Vec<usize> = if target_ids.is_empty() {
            (0..self.entries.len()).collect()
        } else {
            let mut indices = Vec::with_capacity(target_ids.len());
            for id in target_ids {
                match self.entries.iter().position(|e| &e.product_id == id) {
                    Some(i) => indices.push(i),
                    None => return Err(EngineError::LookupNotFound(id.clone())),
                }
            }
            indices
        };

        for i in targets {
            let entry = &mut self.entries[i];
            if update.percentage > 0.0 {
                // Overwrites any prior per-item price customization
                entry.price.set_percentage(update.percentage);
            }
            match update.stock_limit {
                LimitMode::NoUpdate => {}
                LimitMode::NoLimit => entry.no_stock_limit = true,
                LimitMode::SetLimit(value) => {
                    entry.stock_limit = Some(value);
                    entry.no_stock_limit = false;
                }
            }
            match update.purchase_limit {
                LimitMode::NoUpdate => {}
                LimitMode::NoLimit => entry.no_purchase_limit = true,
                LimitMode::SetLimit(value) => {
                    entry.purchase_limit = Some(value);
                    entry.no_purchase_limit = false;
                }
            }
        }
        Ok(())
    }

    /// The persisted product list for submission
    pub fn to_discount_products(&self) -> Vec<DiscountProduct> {
        self.entries.iter().map(WorkingEntry::to_discount_product).collect()
    }
}
