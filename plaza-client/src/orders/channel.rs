//! Realtime channel subscription
//!
//! Subscribes to the per-business push channel and feeds validated events
//! into the order store. The subscription is scoped to the lifetime of the
//! business selection: dropping (or shutting down) the handle cancels the
//! task, so switching business tears the old subscription down before a new
//! one is established and stale events cannot touch an unrelated collection.
//!
//! A dropped connection is retried with bounded exponential backoff rather
//! than failing silent; the last known good collection stays usable while
//! the channel is down.

use crate::config::ClientConfig;
use crate::error::EngineResult;
use crate::orders::store::OrderStoreHandle;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use shared::channel::decode_frame;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Transport that carries raw channel frames for one business
///
/// The returned stream ends when the connection drops; the subscription
/// reconnects. Production wires this to the service's push endpoint; tests
/// use scripted in-process transports.
#[async_trait]
pub trait ChannelTransport: Send + Sync + 'static {
    async fn connect(&self, business_id: &str) -> EngineResult<BoxStream<'static, String>>;
}

/// Reconnect backoff tuning
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl From<&ClientConfig> for ReconnectPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            initial_delay: Duration::from_millis(config.reconnect_delay_ms),
            max_delay: Duration::from_millis(config.reconnect_max_delay_ms),
        }
    }
}

/// Handle to a running channel subscription
///
/// Dropping the handle cancels the subscription task.
#[derive(Debug)]
pub struct ChannelSubscription {
    cancel: CancellationToken,
}

impl ChannelSubscription {
    /// Spawn the subscription task for one business view
    pub fn spawn(
        transport: Arc<dyn ChannelTransport>,
        business_id: impl Into<String>,
        store: OrderStoreHandle,
        policy: ReconnectPolicy,
    ) -> Self {
        let business_id = business_id.into();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            run_subscription(transport, business_id, store, policy, task_cancel).await;
        });

        Self { cancel }
    }

    /// Tear the subscription down explicitly
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ChannelSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_subscription(
    transport: Arc<dyn ChannelTransport>,
    business_id: String,
    store: OrderStoreHandle,
    policy: ReconnectPolicy,
    cancel: CancellationToken,
) {
    let mut delay = policy.initial_delay;

    loop {
        let connect = tokio::select! {
            _ = cancel.cancelled() => return,
            result = transport.connect(&business_id) => result,
        };

        match connect {
            Ok(mut frames) => {
                info!(business_id = %business_id, "Channel connected");
                delay = policy.initial_delay;

                loop {
                    let frame = tokio::select! {
                        _ = cancel.cancelled() => return,
                        frame = frames.next() => frame,
                    };
                    match frame {
                        Some(raw) => {
                            if !handle_frame(&raw, &business_id, &store) {
                                // Store task is gone; nothing left to feed.
                                return;
                            }
                        }
                        None => {
                            warn!(business_id = %business_id, "Channel disconnected");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(business_id = %business_id, error = %e, "Channel connect failed");
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
        delay = (delay * 2).min(policy.max_delay);
    }
}

/// Decode, validate and apply one frame. Returns false once the store has
/// shut down.
fn handle_frame(raw: &str, business_id: &str, store: &OrderStoreHandle) -> bool {
    let event = match decode_frame(raw) {
        Ok(event) => event,
        Err(e) => {
            // Malformed frames are rejected here, at the transport boundary,
            // never handed to reconciliation.
            warn!(business_id, error = %e, "Dropping malformed channel frame");
            return true;
        }
    };

    if event.order().business_id != business_id {
        warn!(
            business_id,
            event_business_id = %event.order().business_id,
            "Dropping frame for another business"
        );
        return true;
    }

    debug!(order_id = %event.order().id, "Applying channel event");
    store.apply_event(event).is_ok()
}
