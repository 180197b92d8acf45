//! Channel transport server.
//!
//! A channel is a logical addressable endpoint keyed by payment id; the
//! wallet peer for a payment holds a long-lived connection bound to the
//! channel named after that payment. This module owns the channel registry,
//! the pending-wait table for awaited request/reply exchanges, and the
//! route-handler registry for peer-originated messages. The socket pump that
//! feeds it lives in `transport::ws`.

pub mod handlers;
pub mod hooks;
mod pending;
pub mod server;

pub use handlers::{register_protocol_forwarders, Forwarder, MessageHandler};
pub use server::{ChannelServer, PeerRef};
