//! Engine error types
//!
//! Every error here is recoverable and surfaced to the operator; none is
//! fatal to the process. Reconciliation drops unmatched update events
//! silently by design - that path is not an error.

use shared::models::OrderStatus;
use std::collections::BTreeMap;
use thiserror::Error;

/// Aggregated validation failures, keyed by field
///
/// All violations are collected before rejecting - never fail-fast on the
/// first. The caller decides how many to surface at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for a field. The first message per field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume into the raw field -> message map
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Return `Err(self)` if any violation was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// Requested status change is not legal from the current state.
    /// Surfaced to the operator, never silently applied.
    #[error("Transition from {from} to {to} is not allowed")]
    ForbiddenTransition { from: OrderStatus, to: OrderStatus },

    /// Discount submission violates an invariant; all violations returned
    /// together
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Lookup failure (e.g. arrival code matches no order) - distinct from a
    /// transition error
    #[error("Not found: {0}")]
    LookupNotFound(String),

    /// A transition request for this order is already outstanding
    #[error("Request already in flight for order {order_id}")]
    RequestInFlight { order_id: String },

    /// Network failure; the last known good collection remains usable
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service replied with a non-success envelope
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The order store task has shut down
    #[error("Order store is closed")]
    StoreClosed,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
