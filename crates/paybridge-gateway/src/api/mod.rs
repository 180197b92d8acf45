//! HTTP API: payment-protocol endpoints and error mapping.

mod error;
mod payment;
mod proof;

pub use error::ApiError;
pub use payment::{payment_create, payment_terms};
pub use proof::proof_create;
