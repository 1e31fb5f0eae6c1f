//! Order fulfillment: state machine, store, realtime channel, services

pub mod arrival;
pub mod channel;
pub mod service;
pub mod state_machine;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use arrival::{ARRIVAL_CODE_LEN, ArrivalOutcome, normalize_code};
pub use channel::{ChannelSubscription, ChannelTransport, ReconnectPolicy};
pub use service::OrderService;
pub use state_machine::{TransitionAction, available_transitions, check_transition};
pub use store::{OrderStore, OrderStoreHandle};
