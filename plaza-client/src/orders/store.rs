//! Single-writer order store with realtime reconciliation
//!
//! The in-memory order collection for one business view is owned by exactly
//! one task. The three write paths - full fetch, channel event, user action
//! (which triggers a full re-fetch) - arrive as distinct messages into that
//! task, so mutations never race; the remaining hazard is stale overwrite,
//! which is accepted because the transport provides no ordering token.
//!
//! Reconciliation rules, applied against the most-recent-first collection:
//! - `order_created`: prepend unconditionally. The channel is assumed not to
//!   redeliver creation events, so no de-duplication is attempted.
//! - `order_updated`: replace the entry with a matching id in place,
//!   preserving list position; if no entry matches, drop the event silently
//!   (an update for an order not yet visible locally is not actionable).
//!
//! The last event applied for a given id always wins.

use crate::error::{EngineError, EngineResult};
use shared::channel::ChannelEvent;
use shared::models::{Order, OrderStatus};
use shared::util::now_millis;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// In-memory order collection for one business, most-recent-first
///
/// Pure and synchronous; all mutation goes through [`OrderStoreHandle`] in
/// production so the single-writer property holds.
#[derive(Debug)]
pub struct OrderStore {
    business_id: String,
    orders: Vec<Order>,
    /// Millis timestamp of the last completed full fetch, None before the
    /// first one
    last_synced_at: Option<i64>,
}

impl OrderStore {
    pub fn new(business_id: impl Into<String>) -> Self {
        Self {
            business_id: business_id.into(),
            orders: Vec::new(),
            last_synced_at: None,
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    /// Replace the whole collection from a completed full fetch
    pub fn replace_all(&mut self, orders: Vec<Order>) {
        debug!(
            business_id = %self.business_id,
            count = orders.len(),
            "Replacing order collection from full fetch"
        );
        self.orders = orders;
        self.last_synced_at = Some(now_millis());
    }

    /// Apply a validated channel event
    pub fn apply_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::OrderCreated(order) => {
                debug!(order_id = %order.id, "Prepending created order");
                self.orders.insert(0, order);
            }
            ChannelEvent::OrderUpdated(order) => {
                match self.orders.iter_mut().find(|o| o.id == order.id) {
                    Some(slot) => {
                        debug!(order_id = %order.id, "Replacing updated order in place");
                        *slot = order;
                    }
                    None => {
                        // Not an error: the order is simply not visible
                        // locally yet.
                        debug!(order_id = %order.id, "Dropping update for unknown order");
                    }
                }
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Orders currently in `status`, preserving collection order
    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over order number and customer email
    pub fn search(&self, text: &str) -> Vec<Order> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.orders.clone();
        }
        self.orders
            .iter()
            .filter(|o| {
                o.order_number.to_lowercase().contains(&needle)
                    || o.user_email
                        .as_deref()
                        .is_some_and(|e| e.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn last_synced_at(&self) -> Option<i64> {
        self.last_synced_at
    }
}

/// Messages into the store task - one variant per write path, plus queries
#[derive(Debug)]
enum StoreCommand {
    /// Full fetch completed
    ReplaceAll(Vec<Order>),
    /// Validated channel event
    ApplyEvent(ChannelEvent),
    Snapshot(oneshot::Sender<Vec<Order>>),
    Get(String, oneshot::Sender<Option<Order>>),
    ByStatus(OrderStatus, oneshot::Sender<Vec<Order>>),
    Search(String, oneshot::Sender<Vec<Order>>),
}

/// Handle to the store task
///
/// Cheap to clone; dropping every handle shuts the task down.
#[derive(Debug, Clone)]
pub struct OrderStoreHandle {
    tx: mpsc::UnboundedSender<StoreCommand>,
}

impl OrderStoreHandle {
    /// Spawn the store task for one business view
    pub fn spawn(business_id: impl Into<String>) -> Self {
        let mut store = OrderStore::new(business_id);
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    StoreCommand::ReplaceAll(orders) => store.replace_all(orders),
                    StoreCommand::ApplyEvent(event) => store.apply_event(event),
                    StoreCommand::Snapshot(reply) => {
                        let _ = reply.send(store.orders().to_vec());
                    }
                    StoreCommand::Get(id, reply) => {
                        let _ = reply.send(store.get(&id).cloned());
                    }
                    StoreCommand::ByStatus(status, reply) => {
                        let _ = reply.send(store.orders_by_status(status));
                    }
                    StoreCommand::Search(text, reply) => {
                        let _ = reply.send(store.search(&text));
                    }
                }
            }
            debug!("Order store task shutting down");
        });

        Self { tx }
    }

    fn send(&self, cmd: StoreCommand) -> EngineResult<()> {
        self.tx.send(cmd).map_err(|_| EngineError::StoreClosed)
    }

    async fn query<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> StoreCommand,
    ) -> EngineResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make(reply_tx))?;
        reply_rx.await.map_err(|_| EngineError::StoreClosed)
    }

    /// Feed a completed full fetch into the store
    pub fn replace_all(&self, orders: Vec<Order>) -> EngineResult<()> {
        self.send(StoreCommand::ReplaceAll(orders))
    }

    /// Feed a validated channel event into the store
    pub fn apply_event(&self, event: ChannelEvent) -> EngineResult<()> {
        self.send(StoreCommand::ApplyEvent(event))
    }

    pub async fn snapshot(&self) -> EngineResult<Vec<Order>> {
        self.query(StoreCommand::Snapshot).await
    }

    pub async fn get(&self, order_id: &str) -> EngineResult<Option<Order>> {
        let id = order_id.to_string();
        self.query(|reply| StoreCommand::Get(id, reply)).await
    }

    pub async fn orders_by_status(&self, status: OrderStatus) -> EngineResult<Vec<Order>> {
        self.query(|reply| StoreCommand::ByStatus(status, reply))
            .await
    }

    pub async fn search(&self, text: &str) -> EngineResult<Vec<Order>> {
        let text = text.to_string();
        self.query(|reply| StoreCommand::Search(text, reply)).await
    }
}
