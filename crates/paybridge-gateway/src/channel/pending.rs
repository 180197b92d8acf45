//! Pending-wait table for awaited channel requests.
//!
//! Keyed by `(channel id, correlation id)` so a reply can only ever satisfy
//! the request that carries its correlation token. Two awaited requests
//! racing on the same channel cannot be satisfied by each other's replies.

use dashmap::DashMap;
use tokio::sync::oneshot;

use paybridge_core::protocol::Envelope;

#[derive(Default)]
pub(crate) struct PendingWaits {
    waits: DashMap<(String, String), oneshot::Sender<Envelope>>,
}

impl PendingWaits {
    /// Register a wait for a correlated reply on a channel. The returned
    /// receiver resolves when `complete` consumes a matching envelope.
    pub fn register(&self, channel_id: &str, correlation_id: &str) -> oneshot::Receiver<Envelope> {
        let (tx, rx) = oneshot::channel();
        self.waits
            .insert((channel_id.to_string(), correlation_id.to_string()), tx);
        rx
    }

    /// Offer a reply envelope to its waiter. Gives the envelope back when no
    /// wait holds its correlation id, or when the waiter already gave up.
    pub fn complete(&self, env: Envelope) -> Result<(), Envelope> {
        let key = (env.channel_id.clone(), env.correlation_id.clone());
        match self.waits.remove(&key) {
            Some((_, tx)) => tx.send(env),
            None => Err(env),
        }
    }

    /// Drop a wait that will never be completed (timeout, send failure).
    pub fn remove(&self, channel_id: &str, correlation_id: &str) {
        self.waits
            .remove(&(channel_id.to_string(), correlation_id.to_string()));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.waits.len()
    }
}
