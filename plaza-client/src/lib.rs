//! Plaza Client - order fulfillment and promotional pricing engine
//!
//! Client-resident core for the Plaza service: the order lifecycle state
//! machine with realtime reconciliation, arrival verification, and the
//! discount pricing/limit engine. Persistence and authorization live in the
//! external service; this crate owns the in-memory state and the rules.

pub mod config;
pub mod discounts;
pub mod error;
pub mod http;
pub mod orders;

pub use config::ClientConfig;
pub use error::{EngineError, EngineResult, ValidationErrors};
pub use http::{NetworkClient, PlazaApi};

pub use discounts::{DiscountBucket, DiscountDraft, DiscountService, PricePair, WorkingSet};
pub use orders::{
    ArrivalOutcome, ChannelSubscription, OrderService, OrderStoreHandle, available_transitions,
};

// Re-export shared types for convenience
pub use shared::channel::ChannelEvent;
pub use shared::models::{Discount, Order, OrderStatus, PaymentStatus};
