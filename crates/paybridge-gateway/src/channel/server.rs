//! Channel server: registry, broadcast and broadcast-await primitives.

use std::sync::Arc;
use std::sync::RwLock;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::Envelope;

use crate::channel::hooks::{ChannelHook, ClientHook, LifecycleHooks};
use crate::channel::pending::PendingWaits;
use crate::channel::MessageHandler;

/// Depth of each peer's outbound frame queue.
const OUTBOUND_QUEUE: usize = 64;

/// One connected peer's outbound queue. Frames are serialized once and
/// queued as text; the socket pump drains the queue.
#[derive(Clone)]
struct PeerConnection {
    tx: mpsc::Sender<String>,
}

/// Identifies one attached peer. Handed out by `attach` and required by
/// `deliver`/`detach`, so the socket pump cannot address the wrong channel.
#[derive(Debug, Clone)]
pub struct PeerRef {
    pub client_id: String,
    pub channel_id: String,
}

/// Channel server.
///
/// Exclusively owns the `channel id -> peers` mapping: a channel is created
/// on first attach and closed when its last peer detaches. The bridge never
/// holds raw connections, it addresses peers by channel id through
/// `broadcast`/`broadcast_await`.
pub struct ChannelServer {
    channels: DashMap<String, DashMap<String, PeerConnection>>,
    pending: PendingWaits,
    handlers: DashMap<String, Arc<dyn MessageHandler>>,
    hooks: RwLock<LifecycleHooks>,
    max_message_bytes: usize,
}

impl ChannelServer {
    pub fn new(max_message_bytes: usize) -> Self {
        Self {
            channels: DashMap::new(),
            pending: PendingWaits::default(),
            handlers: DashMap::new(),
            hooks: RwLock::new(LifecycleHooks::default()),
            max_message_bytes,
        }
    }

    /// Largest frame a peer may send before the connection is dropped.
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }

    /// Whether any peer is currently attached under this channel id.
    pub fn has_channel(&self, channel_id: &str) -> bool {
        self.channels.contains_key(channel_id)
    }

    pub fn register_handler(&self, handler: Arc<dyn MessageHandler>) {
        self.handlers.insert(handler.key().to_string(), handler);
    }

    // --------------------
    // Lifecycle hooks
    // --------------------

    pub fn on_client_join(&self, f: impl Fn(&str, &str) + Send + Sync + 'static) {
        self.push_hook(|h| h.client_join.push(Box::new(f)));
    }

    pub fn on_client_leave(&self, f: impl Fn(&str, &str) + Send + Sync + 'static) {
        self.push_hook(|h| h.client_leave.push(Box::new(f)));
    }

    pub fn on_channel_create(&self, f: impl Fn(&str) + Send + Sync + 'static) {
        self.push_hook(|h| h.channel_create.push(Box::new(f)));
    }

    pub fn on_channel_close(&self, f: impl Fn(&str) + Send + Sync + 'static) {
        self.push_hook(|h| h.channel_close.push(Box::new(f)));
    }

    fn push_hook(&self, register: impl FnOnce(&mut LifecycleHooks)) {
        if let Ok(mut hooks) = self.hooks.write() {
            register(&mut hooks);
        }
    }

    fn fire_client(&self, select: impl Fn(&LifecycleHooks) -> &Vec<ClientHook>, client: &str, channel: &str) {
        if let Ok(hooks) = self.hooks.read() {
            for f in select(&hooks) {
                f(client, channel);
            }
        }
    }

    fn fire_channel(&self, select: impl Fn(&LifecycleHooks) -> &Vec<ChannelHook>, channel: &str) {
        if let Ok(hooks) = self.hooks.read() {
            for f in select(&hooks) {
                f(channel);
            }
        }
    }

    // --------------------
    // Peer lifecycle
    // --------------------

    /// Attach a peer to a channel, creating the channel on first attach.
    /// Returns the peer's identity and the outbound frame queue the socket
    /// pump must drain.
    pub fn attach(&self, channel_id: &str) -> (PeerRef, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE);
        let client_id = uuid::Uuid::new_v4().to_string();

        let created = {
            let entry = self
                .channels
                .entry(channel_id.to_string())
                .or_insert_with(DashMap::new);
            let created = entry.is_empty();
            entry.insert(client_id.clone(), PeerConnection { tx });
            created
        };

        if created {
            tracing::info!(channel = %channel_id, "channel created");
            self.fire_channel(|h| &h.channel_create, channel_id);
        }
        tracing::debug!(channel = %channel_id, client = %client_id, "client joined");
        self.fire_client(|h| &h.client_join, &client_id, channel_id);

        (
            PeerRef {
                client_id,
                channel_id: channel_id.to_string(),
            },
            rx,
        )
    }

    /// Detach a peer, closing the channel when it was the last one.
    pub fn detach(&self, peer: &PeerRef) {
        let mut closed = false;
        if let Some(peers) = self.channels.get(&peer.channel_id) {
            peers.remove(&peer.client_id);
            if peers.is_empty() {
                drop(peers);
                self.channels.remove(&peer.channel_id);
                closed = true;
            }
        }

        tracing::debug!(channel = %peer.channel_id, client = %peer.client_id, "client left");
        self.fire_client(|h| &h.client_leave, &peer.client_id, &peer.channel_id);
        if closed {
            tracing::info!(channel = %peer.channel_id, "channel closed");
            self.fire_channel(|h| &h.channel_close, &peer.channel_id);
        }
    }

    // --------------------
    // Inbound
    // --------------------

    /// Dispatch an envelope received from a peer: complete the pending wait
    /// holding its correlation id, or hand it to the handler registered for
    /// its route, or discard it.
    pub async fn deliver(&self, peer: &PeerRef, env: Envelope) {
        if env.channel_id != peer.channel_id {
            tracing::warn!(
                got = %env.channel_id,
                bound = %peer.channel_id,
                key = %env.key,
                "dropping envelope addressed to another channel"
            );
            return;
        }

        let env = match self.pending.complete(env) {
            Ok(()) => return,
            Err(env) => env,
        };

        let Some(handler) = self.handlers.get(&env.key).map(|h| h.value().clone()) else {
            tracing::debug!(key = %env.key, channel = %env.channel_id, correlation = %env.correlation_id,
                "discarding envelope with no waiter or handler");
            return;
        };

        match handler.handle(&env).await {
            Ok(Some(fwd)) => {
                if let Err(e) = self.broadcast_from(&env.channel_id, Some(&peer.client_id), &fwd) {
                    tracing::warn!(key = %fwd.key, channel = %env.channel_id, "forward failed: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %env.key, channel = %env.channel_id, "handler failed: {e}");
            }
        }
    }

    // --------------------
    // Outbound
    // --------------------

    /// Fire-and-forget send to every peer on the channel.
    pub fn broadcast(&self, channel_id: &str, env: &Envelope) -> Result<()> {
        self.broadcast_from(channel_id, None, env)
    }

    fn broadcast_from(&self, channel_id: &str, exclude: Option<&str>, env: &Envelope) -> Result<()> {
        let peers = self
            .channels
            .get(channel_id)
            .ok_or_else(|| PayBridgeError::NotFound(format!("channel {channel_id} not found")))?;

        // serialize once, send N times
        let frame = serde_json::to_string(env)
            .map_err(|e| PayBridgeError::Decode(format!("failed to encode envelope: {e}")))?;

        let mut sent = 0usize;
        for peer in peers.iter() {
            if exclude == Some(peer.key().as_str()) {
                continue;
            }
            if peer.value().tx.try_send(frame.clone()).is_ok() {
                sent += 1;
            } else {
                tracing::warn!(channel = %channel_id, client = %peer.key(), "outbound queue full, dropping frame");
            }
        }
        if sent == 0 && exclude.is_none() {
            return Err(PayBridgeError::Transport(format!(
                "no reachable peer on channel {channel_id}"
            )));
        }
        Ok(())
    }

    /// Send an envelope on a channel and suspend until a reply bearing the
    /// same correlation id arrives, or the deadline elapses.
    pub async fn broadcast_await(
        &self,
        channel_id: &str,
        env: Envelope,
        deadline: Duration,
    ) -> Result<Envelope> {
        if env.correlation_id.is_empty() {
            return Err(PayBridgeError::Internal(
                "awaited envelope requires a correlation id".into(),
            ));
        }
        if !self.has_channel(channel_id) {
            return Err(PayBridgeError::NotFound(format!(
                "channel {channel_id} not found"
            )));
        }

        let correlation_id = env.correlation_id.clone();
        let rx = self.pending.register(channel_id, &correlation_id);

        if let Err(e) = self.broadcast(channel_id, &env) {
            self.pending.remove(channel_id, &correlation_id);
            return Err(e);
        }

        match timeout(deadline, rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => {
                self.pending.remove(channel_id, &correlation_id);
                Err(PayBridgeError::Transport(format!(
                    "reply channel closed while awaiting on {channel_id}"
                )))
            }
            Err(_) => {
                self.pending.remove(channel_id, &correlation_id);
                Err(PayBridgeError::Timeout(channel_id.to_string()))
            }
        }
    }
}
