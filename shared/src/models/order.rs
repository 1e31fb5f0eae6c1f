//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status - single authoritative value, mutated only through
/// the state machine in `plaza-client`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Preparing,
    ReadyForPickup,
    PickedUp,
    CancelledByUser,
    CancelledByBusiness,
    FailedPayment,
}

impl OrderStatus {
    /// Terminal statuses offer no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::PickedUp
                | OrderStatus::CancelledByUser
                | OrderStatus::CancelledByBusiness
                | OrderStatus::FailedPayment
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::CancelledByUser => "cancelled_by_user",
            OrderStatus::CancelledByBusiness => "cancelled_by_business",
            OrderStatus::FailedPayment => "failed_payment",
        };
        write!(f, "{}", s)
    }
}

/// Payment status - independent of the lifecycle status, any value may be
/// set from any other (the service contract enforces no ordering).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        };
        write!(f, "{}", s)
    }
}

/// Order entity as returned by the Plaza service
///
/// `id` is opaque and stable across updates; `order_number` is the
/// human-readable reference, unique per business. Orders are created by the
/// ordering client in `pending` and are never deleted, only archived
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub business_id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Short alphanumeric pickup token, present once the order reaches a
    /// pickup-eligible stage; consumed exactly once for verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_datetime: Option<DateTime<Utc>>,
    /// Amounts in currency unit
    pub total_amount: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    /// Denormalized name of the applied discount, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_name: Option<String>,
    pub item_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response shape for `POST /orders/verify_arrival`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyArrivalResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::ReadyForPickup).unwrap();
        assert_eq!(json, "\"ready_for_pickup\"");

        let back: OrderStatus = serde_json::from_str("\"cancelled_by_business\"").unwrap();
        assert_eq!(back, OrderStatus::CancelledByBusiness);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::PickedUp.is_terminal());
        assert!(OrderStatus::CancelledByUser.is_terminal());
        assert!(OrderStatus::CancelledByBusiness.is_terminal());
        assert!(OrderStatus::FailedPayment.is_terminal());

        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Accepted.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(!OrderStatus::ReadyForPickup.is_terminal());
    }
}
