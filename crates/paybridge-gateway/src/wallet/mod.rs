//! Wallet data stores for direct (non-hybrid) operation.

pub mod client;
pub mod noop;

pub use client::WalletClient;
pub use noop::NoopStore;
