//! Route handlers for peer-originated channel messages.
//!
//! Envelopes that do not complete a pending wait are dispatched here by
//! route key. The default handlers forward the message to the other peers on
//! the channel, which is all the payment protocol needs: the gateway relays
//! between a payer client and the wallet when both sides sit on the channel.

use std::sync::Arc;

use async_trait::async_trait;

use paybridge_core::error::Result;
use paybridge_core::protocol::{routes, Envelope};

use crate::channel::ChannelServer;

/// Handler invoked for inbound envelopes on a registered route. Returning an
/// envelope asks the server to re-broadcast it to the channel's other peers.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn key(&self) -> &str;
    async fn handle(&self, env: &Envelope) -> Result<Option<Envelope>>;
}

/// Pass-through handler: relays the envelope unchanged.
pub struct Forwarder {
    key: &'static str,
}

impl Forwarder {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

#[async_trait]
impl MessageHandler for Forwarder {
    fn key(&self) -> &str {
        self.key
    }

    async fn handle(&self, env: &Envelope) -> Result<Option<Envelope>> {
        Ok(Some(env.clone()))
    }
}

/// Register forwarding handlers for every payment-protocol route.
pub fn register_protocol_forwarders(server: &ChannelServer) {
    for key in [
        routes::ROUTE_TERMS_CREATE,
        routes::ROUTE_TERMS_RESPONSE,
        routes::ROUTE_TERMS_ERROR,
        routes::ROUTE_PAYMENT,
        routes::ROUTE_PAYMENT_ACK,
        routes::ROUTE_PAYMENT_ERROR,
        routes::ROUTE_PROOF_CREATE,
    ] {
        server.register_handler(Arc::new(Forwarder::new(key)));
    }
}
