//! Transport layer (WebSocket).
//!
//! Exposes the channel upgrade endpoint and the session loop that pumps a
//! socket into the channel server.

pub mod ws;
