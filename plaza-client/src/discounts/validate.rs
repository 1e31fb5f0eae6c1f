//! Submit-time discount validation
//!
//! Enforced over every entry in the working set, not only batch-touched
//! ones. All violations are collected into a field -> message map before
//! the submission is rejected; the caller decides how many to surface.

use crate::discounts::working_set::WorkingSet;
use crate::error::{EngineResult, ValidationErrors};
use chrono::{DateTime, Utc};
use shared::models::{Discount, DiscountCreate, ProductInfo};

/// A discount being composed, before submission
#[derive(Debug, Clone)]
pub struct DiscountDraft {
    pub business_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub working_set: WorkingSet,
}

impl DiscountDraft {
    /// Rebuild a draft from a persisted discount for re-editing
    ///
    /// Restores each product entry's price pair and limit flags against the
    /// current catalog; the window stays in UTC here and is converted back
    /// to wall-clock by [`crate::discounts::wallclock::utc_to_local`] at the
    /// edge.
    pub fn from_discount(discount: &Discount, catalog: &[ProductInfo]) -> Self {
        Self {
            business_id: discount.business_id.clone(),
            name: discount.name.clone(),
            description: discount.description.clone(),
            start_datetime: discount.start_datetime,
            end_datetime: discount.end_datetime,
            working_set: WorkingSet::from_persisted(&discount.applicable_products, catalog),
        }
    }

    /// Check every submission invariant, collecting all violations
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Discount name must not be empty");
        }

        if self.working_set.is_empty() {
            errors.add("products", "At least one product is required");
        }

        if let Some(end) = self.end_datetime
            && end <= self.start_datetime
        {
            errors.add("end_datetime", "End time must be after start time");
        }

        for entry in self.working_set.entries() {
            let field = format!("products.{}", entry.product_id);

            if entry.price.discounted_price() >= entry.price.original_price() {
                errors.add(
                    &field,
                    format!(
                        "Discounted price for {} must be below the original price {:.2}",
                        entry.name,
                        entry.price.original_price()
                    ),
                );
            }

            if let Some(limit) = entry.effective_stock_limit()
                && limit > entry.current_stock
            {
                errors.add(
                    &field,
                    format!(
                        "Stock limit for {} exceeds current stock {}",
                        entry.name, entry.current_stock
                    ),
                );
            }
        }

        errors.into_result()
    }

    /// Validate and build the creation payload
    pub fn into_create(self) -> EngineResult<DiscountCreate> {
        self.validate()?;
        Ok(DiscountCreate {
            business_id: self.business_id,
            name: self.name,
            description: self.description,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            applicable_products: self.working_set.to_discount_products(),
        })
    }
}
