//! Shared types for the Plaza platform
//!
//! Wire-level data model shared between the client-resident engine and any
//! embedding app: orders, discounts, realtime channel events, the API
//! response envelope, and small time utilities.

pub mod channel;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use channel::{ChannelDecodeError, ChannelEvent};
pub use response::ApiResponse;
