//! Data models
//!
//! Shared between the Plaza service API and the client-resident engine.
//! Orders and discounts are persisted server-side; the client only ever
//! holds fetched copies and ephemeral edit projections.

pub mod discount;
pub mod order;
pub mod product;

// Re-exports
pub use discount::*;
pub use order::*;
pub use product::*;
