//! paybridge core: protocol primitives and error types for the DPP gateway.
//!
//! This crate defines the channel message envelope, the DPP wire types
//! (payment terms, payment, ack, proof envelope) and the error surface shared
//! by the gateway and its stores. It intentionally carries no transport or
//! runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PayBridgeError`/`Result` so the
//! gateway does not crash on malformed wallet traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ClientError, PayBridgeError, Result};
