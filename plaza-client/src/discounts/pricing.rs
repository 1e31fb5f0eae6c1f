//! Discounted price / percentage pair
//!
//! `discounted_price` and `discount_percentage` are two views of one
//! quantity. [`PricePair`] keeps them consistent: writing either field
//! recomputes the other immediately, using rust_decimal internally and
//! storing f64.
//!
//! Rounding order matters for fixture compatibility: the price is computed
//! first (from a percentage write), the percentage second (from a price
//! write), each rounded to 2 decimals independently. Repeated round-trips
//! between the two fields are therefore not guaranteed bit-for-bit
//! idempotent at the decimal boundary.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary or percentage value to 2 decimal places, half away
/// from zero
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// The two-way bound price/percentage pair for one working-set entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePair {
    original_price: f64,
    discounted_price: f64,
    percentage: f64,
}

impl PricePair {
    /// Start undiscounted: price equals the original, percentage zero
    pub fn new(original_price: f64) -> Self {
        Self {
            original_price,
            discounted_price: round2(original_price),
            percentage: 0.0,
        }
    }

    pub fn original_price(&self) -> f64 {
        self.original_price
    }

    pub fn discounted_price(&self) -> f64 {
        self.discounted_price
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Set the discount percentage; the price is recomputed as
    /// `round2(original × (1 − pct/100))`.
    pub fn set_percentage(&mut self, percentage: f64) {
        let original = to_decimal(self.original_price);
        let pct = to_decimal(percentage);
        let multiplier = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
        self.discounted_price = to_f64(original * multiplier);
        self.percentage = to_f64(pct);
    }

    /// Set the discounted price; the percentage is recomputed as
    /// `round2((1 − price/original) × 100)`.
    ///
    /// A zero original price leaves the percentage at zero rather than
    /// dividing by it.
    pub fn set_discounted_price(&mut self, price: f64) {
        let original = to_decimal(self.original_price);
        let discounted = to_decimal(price);
        self.discounted_price = to_f64(discounted);
        self.percentage = if original.is_zero() {
            0.0
        } else {
            to_f64((Decimal::ONE - discounted / original) * Decimal::ONE_HUNDRED)
        };
    }
}
