//! Top-level facade crate for paybridge.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use paybridge_core::*;
}

pub mod gateway {
    pub use paybridge_gateway::*;
}
