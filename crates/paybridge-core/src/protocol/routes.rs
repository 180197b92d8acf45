//! Route keys for channel messages used in the payment protocol.

/// Application namespace tag carried by every envelope this gateway emits.
pub const APP_ID: &str = "dpp";

pub const ROUTE_PAYMENT: &str = "payment";
pub const ROUTE_PAYMENT_ACK: &str = "payment.ack";
pub const ROUTE_PAYMENT_ERROR: &str = "payment.error";
pub const ROUTE_PROOF_CREATE: &str = "proof.create";
pub const ROUTE_TERMS_CREATE: &str = "paymentterms.create";
pub const ROUTE_TERMS_RESPONSE: &str = "paymentterms.response";
pub const ROUTE_TERMS_ERROR: &str = "paymentterms.error";

/// Header carrying the transaction id on proof messages, redundant with the
/// envelope correlation id for routing and logging.
pub const HEADER_TX_ID: &str = "x-tx-id";
