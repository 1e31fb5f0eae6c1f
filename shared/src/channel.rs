//! Realtime channel events
//!
//! The Plaza service pushes incremental order events on a per-business
//! channel. Frames are JSON objects of the form
//! `{"type": "order_created" | "order_updated", "payload": <Order>}`.
//!
//! Frames are decoded and validated here, at the transport boundary, so the
//! reconciliation logic only ever sees well-formed events.

use crate::models::Order;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Channel event - tagged union matching the wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ChannelEvent {
    OrderCreated(Order),
    OrderUpdated(Order),
}

impl ChannelEvent {
    /// The order carried by this event
    pub fn order(&self) -> &Order {
        match self {
            ChannelEvent::OrderCreated(order) | ChannelEvent::OrderUpdated(order) => order,
        }
    }
}

/// Error decoding a channel frame
#[derive(Debug, Error)]
pub enum ChannelDecodeError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    Invalid(String),
}

/// Decode and validate a raw channel frame
///
/// Rejects malformed JSON, unknown event types, and payloads missing a
/// usable order identity, rather than propagating them into reconciliation.
pub fn decode_frame(raw: &str) -> Result<ChannelEvent, ChannelDecodeError> {
    let event: ChannelEvent = serde_json::from_str(raw)?;

    let order = event.order();
    if order.id.is_empty() {
        return Err(ChannelDecodeError::Invalid("empty order id".to_string()));
    }
    if order.business_id.is_empty() {
        return Err(ChannelDecodeError::Invalid(format!(
            "order {} has no business id",
            order.id
        )));
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, PaymentStatus};

    fn order_json(id: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "business_id": "biz-1",
                "order_number": "ORD-1001",
                "status": "pending",
                "payment_status": "paid",
                "total_amount": 25.5,
                "subtotal": 25.5,
                "discount_amount": 0.0,
                "item_count": 2,
                "created_at": "2025-10-19T10:00:00Z"
            }}"#
        )
    }

    #[test]
    fn test_decode_order_created() {
        let raw = format!(
            r#"{{"type": "order_created", "payload": {}}}"#,
            order_json("ord-1")
        );
        let event = decode_frame(&raw).unwrap();
        match event {
            ChannelEvent::OrderCreated(order) => {
                assert_eq!(order.id, "ord-1");
                assert_eq!(order.status, OrderStatus::Pending);
                assert_eq!(order.payment_status, PaymentStatus::Paid);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_order_updated() {
        let raw = format!(
            r#"{{"type": "order_updated", "payload": {}}}"#,
            order_json("ord-2")
        );
        let event = decode_frame(&raw).unwrap();
        assert!(matches!(event, ChannelEvent::OrderUpdated(_)));
    }

    #[test]
    fn test_reject_unknown_type() {
        let raw = format!(
            r#"{{"type": "order_deleted", "payload": {}}}"#,
            order_json("ord-3")
        );
        assert!(matches!(
            decode_frame(&raw),
            Err(ChannelDecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_reject_malformed_json() {
        assert!(decode_frame("not json at all").is_err());
    }

    #[test]
    fn test_reject_empty_order_id() {
        let raw = format!(
            r#"{{"type": "order_created", "payload": {}}}"#,
            order_json("")
        );
        assert!(matches!(
            decode_frame(&raw),
            Err(ChannelDecodeError::Invalid(_))
        ));
    }
}
