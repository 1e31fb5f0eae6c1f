//! Order service - user-action write path
//!
//! Combines the REST client, the order store and the state machine. Status
//! changes are checked against the state machine before the request goes
//! out, debounced per order id while a request is outstanding, and followed
//! by a full re-fetch: the engine never partially mutates the authoritative
//! record locally, to avoid diverging from server-computed side effects.

use crate::error::{EngineError, EngineResult};
use crate::http::PlazaApi;
use crate::orders::arrival::{ArrivalOutcome, is_plausible_code, normalize_code};
use crate::orders::state_machine::{TransitionAction, available_transitions, check_transition};
use crate::orders::store::OrderStoreHandle;
use parking_lot::Mutex;
use shared::models::{Order, OrderStatus, PaymentStatus};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Removes the order id from the in-flight set when the request settles,
/// success or failure.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    order_id: String,
}

impl InFlightGuard {
    fn acquire(set: &Arc<Mutex<HashSet<String>>>, order_id: &str) -> EngineResult<Self> {
        if !set.lock().insert(order_id.to_string()) {
            return Err(EngineError::RequestInFlight {
                order_id: order_id.to_string(),
            });
        }
        Ok(Self {
            set: set.clone(),
            order_id: order_id.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().remove(&self.order_id);
    }
}

/// Order service for one business view
#[derive(Clone)]
pub struct OrderService {
    api: Arc<dyn PlazaApi>,
    store: OrderStoreHandle,
    business_id: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl OrderService {
    /// Create a service and spawn its backing store task
    pub fn new(api: Arc<dyn PlazaApi>, business_id: impl Into<String>) -> Self {
        let business_id = business_id.into();
        Self {
            api,
            store: OrderStoreHandle::spawn(business_id.clone()),
            business_id,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    /// Handle to the reconciled collection, for queries and for wiring the
    /// channel subscription
    pub fn store(&self) -> &OrderStoreHandle {
        &self.store
    }

    /// Full fetch: replace the collection with the service's current list
    pub async fn refresh(&self) -> EngineResult<usize> {
        let orders = self.api.fetch_orders(&self.business_id).await?;
        let count = orders.len();
        self.store.replace_all(orders)?;
        Ok(count)
    }

    /// The action set currently offered for an order
    pub async fn actions_for(&self, order_id: &str) -> EngineResult<&'static [TransitionAction]> {
        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or_else(|| EngineError::LookupNotFound(format!("order {}", order_id)))?;
        Ok(available_transitions(order.status))
    }

    /// Request a status transition for an order in the store
    ///
    /// Fails with `ForbiddenTransition` before any request is issued if the
    /// target is not in the current action set.
    pub async fn request_transition(
        &self,
        order_id: &str,
        target: OrderStatus,
    ) -> EngineResult<Order> {
        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or_else(|| EngineError::LookupNotFound(format!("order {}", order_id)))?;

        self.transition(&order, target).await
    }

    /// Issue the transition for an already-resolved order
    async fn transition(&self, order: &Order, target: OrderStatus) -> EngineResult<Order> {
        check_transition(order.status, target)?;

        let _guard = InFlightGuard::acquire(&self.in_flight, &order.id)?;

        info!(
            order_id = %order.id,
            from = %order.status,
            to = %target,
            "Requesting status transition"
        );
        let updated = self.api.set_order_status(&order.id, target).await?;

        // Re-fetch the authoritative collection rather than patching the
        // local entry; the server may have recalculated derived fields.
        self.refresh().await?;
        Ok(updated)
    }

    /// Set the payment status - unconstrained by the lifecycle machine
    pub async fn set_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> EngineResult<Order> {
        let _guard = InFlightGuard::acquire(&self.in_flight, order_id)?;

        info!(order_id, payment_status = %payment_status, "Setting payment status");
        let updated = self.api.set_payment_status(order_id, payment_status).await?;

        self.refresh().await?;
        Ok(updated)
    }

    /// Verify an arrival code and drive the pickup transition
    ///
    /// The resolved order is transitioned without re-checking pickup
    /// eligibility here; the transition call itself enforces legality and
    /// fails safely with `ForbiddenTransition` if the order is not ready.
    ///
    /// A code that cannot possibly match an issued one (wrong length or
    /// non-alphanumeric after normalization) is a not-found outcome without
    /// a lookup.
    pub async fn verify_arrival(&self, raw_code: &str) -> EngineResult<ArrivalOutcome> {
        let code = normalize_code(raw_code);
        if !is_plausible_code(&code) {
            warn!(code = %code, "Arrival code has the wrong shape, skipping lookup");
            return Ok(ArrivalOutcome::NotFound);
        }

        let response = self.api.verify_arrival(&self.business_id, &code).await?;
        if !response.found {
            warn!(business_id = %self.business_id, code = %code, "Arrival code matched no order");
            return Ok(ArrivalOutcome::NotFound);
        }
        let order = response
            .order
            .ok_or_else(|| EngineError::InvalidResponse("found=true without order".to_string()))?;

        self.transition(&order, OrderStatus::PickedUp).await?;

        info!(order_number = %order.order_number, "Arrival verified, order picked up");
        Ok(ArrivalOutcome::Verified {
            order_number: order.order_number,
        })
    }
}
