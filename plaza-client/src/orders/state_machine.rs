//! Order state machine
//!
//! Legal lifecycle transitions:
//!
//! ```text
//! pending          -> accepted | cancelled_by_business
//! accepted         -> preparing | cancelled_by_business
//! preparing        -> ready_for_pickup | cancelled_by_business
//! ready_for_pickup -> picked_up | cancelled_by_business
//! ```
//!
//! `picked_up`, `cancelled_by_user`, `cancelled_by_business` and
//! `failed_payment` are terminal. `cancelled_by_user` is only ever entered
//! by the ordering client, never through this machine.
//!
//! `payment_status` is deliberately unconstrained: any value may be set from
//! any other. Whether the service enforces an ordering is unknown; do not
//! tighten this client-side without confirming the service contract.

use crate::error::{EngineError, EngineResult};
use shared::models::OrderStatus;

/// A legal next step from a given status, with its operator-facing label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionAction {
    pub target: OrderStatus,
    pub label: &'static str,
}

const FROM_PENDING: &[TransitionAction] = &[
    TransitionAction { target: OrderStatus::Accepted, label: "Accept order" },
    TransitionAction { target: OrderStatus::CancelledByBusiness, label: "Cancel order" },
];

const FROM_ACCEPTED: &[TransitionAction] = &[
    TransitionAction { target: OrderStatus::Preparing, label: "Start preparing" },
    TransitionAction { target: OrderStatus::CancelledByBusiness, label: "Cancel order" },
];

const FROM_PREPARING: &[TransitionAction] = &[
    TransitionAction { target: OrderStatus::ReadyForPickup, label: "Mark ready for pickup" },
    TransitionAction { target: OrderStatus::CancelledByBusiness, label: "Cancel order" },
];

const FROM_READY: &[TransitionAction] = &[
    TransitionAction { target: OrderStatus::PickedUp, label: "Mark picked up" },
    TransitionAction { target: OrderStatus::CancelledByBusiness, label: "Cancel order" },
];

/// Ordered set of legal next statuses for an order in `status`
///
/// Empty for every terminal status.
pub fn available_transitions(status: OrderStatus) -> &'static [TransitionAction] {
    match status {
        OrderStatus::Pending => FROM_PENDING,
        OrderStatus::Accepted => FROM_ACCEPTED,
        OrderStatus::Preparing => FROM_PREPARING,
        OrderStatus::ReadyForPickup => FROM_READY,
        OrderStatus::PickedUp
        | OrderStatus::CancelledByUser
        | OrderStatus::CancelledByBusiness
        | OrderStatus::FailedPayment => &[],
    }
}

/// Check that `from -> to` is a legal transition
///
/// Fails with `ForbiddenTransition` so the operator sees the rejection
/// instead of the change being silently applied.
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> EngineResult<()> {
    if available_transitions(from).iter().any(|a| a.target == to) {
        Ok(())
    } else {
        Err(EngineError::ForbiddenTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: &[OrderStatus] = &[
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::PickedUp,
        OrderStatus::CancelledByUser,
        OrderStatus::CancelledByBusiness,
        OrderStatus::FailedPayment,
    ];

    #[test]
    fn test_happy_path_transitions() {
        assert!(check_transition(OrderStatus::Pending, OrderStatus::Accepted).is_ok());
        assert!(check_transition(OrderStatus::Accepted, OrderStatus::Preparing).is_ok());
        assert!(check_transition(OrderStatus::Preparing, OrderStatus::ReadyForPickup).is_ok());
        assert!(check_transition(OrderStatus::ReadyForPickup, OrderStatus::PickedUp).is_ok());
    }

    #[test]
    fn test_business_cancel_from_every_open_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::ReadyForPickup,
        ] {
            assert!(
                check_transition(from, OrderStatus::CancelledByBusiness).is_ok(),
                "cancel should be allowed from {from}"
            );
        }
    }

    #[test]
    fn test_terminal_states_offer_no_actions() {
        for status in [
            OrderStatus::PickedUp,
            OrderStatus::CancelledByUser,
            OrderStatus::CancelledByBusiness,
            OrderStatus::FailedPayment,
        ] {
            assert!(available_transitions(status).is_empty());
        }
    }

    #[test]
    fn test_no_skipping_stages() {
        assert!(matches!(
            check_transition(OrderStatus::Pending, OrderStatus::ReadyForPickup),
            Err(EngineError::ForbiddenTransition { .. })
        ));
        assert!(matches!(
            check_transition(OrderStatus::Accepted, OrderStatus::PickedUp),
            Err(EngineError::ForbiddenTransition { .. })
        ));
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(check_transition(OrderStatus::Preparing, OrderStatus::Accepted).is_err());
        assert!(check_transition(OrderStatus::PickedUp, OrderStatus::ReadyForPickup).is_err());
    }

    #[test]
    fn test_cancelled_by_user_never_a_target() {
        // Only the ordering client cancels on behalf of the user.
        for from in ALL_STATUSES {
            assert!(check_transition(*from, OrderStatus::CancelledByUser).is_err());
        }
    }

    #[test]
    fn test_action_set_matches_check() {
        // Every offered action passes the check; everything else fails.
        for from in ALL_STATUSES {
            let offered = available_transitions(*from);
            for to in ALL_STATUSES {
                let legal = offered.iter().any(|a| a.target == *to);
                assert_eq!(check_transition(*from, *to).is_ok(), legal);
            }
        }
    }

    #[test]
    fn test_labels_present() {
        for action in available_transitions(OrderStatus::Pending) {
            assert!(!action.label.is_empty());
        }
    }
}
