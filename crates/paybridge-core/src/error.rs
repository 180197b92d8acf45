//! Shared error type across paybridge crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wallet error codes that translate to a not-found domain error.
const NOT_FOUND_CODES: [&str; 2] = ["404", "N0001"];

/// Generic error payload a wallet peer may return over a channel. The same
/// shape is used as the HTTP error body emitted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientError {
    pub id: String,
    pub code: String,
    pub title: String,
    pub message: String,
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PayBridgeError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PayBridgeError {
    /// Bad user input, rejected before any channel or wallet interaction.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Resource (invoice, channel) does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Reply envelope arrived on a route that is neither the success nor the
    /// error route for the operation.
    #[error("unexpected response key '{0}'")]
    UnexpectedKey(String),
    /// Reply decoded but lacks required fields (outputs, fee policy).
    #[error("{0}")]
    MalformedResponse(String),
    /// Await deadline elapsed with no correlated reply.
    #[error("timed out awaiting reply on channel {0}")]
    Timeout(String),
    /// Error payload from the wallet that is not one of the not-found
    /// sentinels; carries the original code for status mapping and logs.
    #[error("wallet error {code}: {message}")]
    Wallet {
        code: String,
        title: String,
        message: String,
    },
    /// Envelope body could not be encoded or decoded.
    #[error("decode failed: {0}")]
    Decode(String),
    /// Send failure, closed connection or other transport fault.
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PayBridgeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> &str {
        match self {
            PayBridgeError::Validation(_) => "400",
            PayBridgeError::NotFound(_) => "404",
            PayBridgeError::Wallet { code, .. } => code,
            PayBridgeError::UnexpectedKey(_)
            | PayBridgeError::MalformedResponse(_)
            | PayBridgeError::Timeout(_)
            | PayBridgeError::Decode(_)
            | PayBridgeError::Transport(_)
            | PayBridgeError::Internal(_) => "500",
        }
    }

    /// Short human title matching the client code.
    pub fn title(&self) -> &str {
        match self {
            PayBridgeError::Validation(_) => "bad request",
            PayBridgeError::NotFound(_) => "not found",
            PayBridgeError::Wallet { title, .. } => title,
            _ => "internal server error",
        }
    }
}

/// Translate a wallet error payload received over a channel into a typed
/// domain error. A small fixed set of sentinel codes means the invoice is
/// unknown to the wallet; everything else passes through for the HTTP layer
/// to map.
impl From<ClientError> for PayBridgeError {
    fn from(e: ClientError) -> Self {
        if NOT_FOUND_CODES.contains(&e.code.as_str()) {
            return PayBridgeError::NotFound(e.message);
        }
        PayBridgeError::Wallet {
            code: e.code,
            title: e.title,
            message: e.message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn client_err(code: &str) -> ClientError {
        ClientError {
            id: "e97970bf-2a88-4bc8-90e6-2f597a80b93d".into(),
            code: code.into(),
            title: "not found".into(),
            message: "payment abc123 not found".into(),
        }
    }

    #[test]
    fn sentinel_codes_translate_to_not_found() {
        for code in ["404", "N0001"] {
            let err = PayBridgeError::from(client_err(code));
            assert!(matches!(err, PayBridgeError::NotFound(_)), "code {code}");
            assert_eq!(err.client_code(), "404");
        }
    }

    #[test]
    fn other_codes_pass_through_as_wallet_errors() {
        let err = PayBridgeError::from(client_err("D102"));
        match &err {
            PayBridgeError::Wallet { code, message, .. } => {
                assert_eq!(code, "D102");
                assert_eq!(message, "payment abc123 not found");
            }
            other => panic!("expected wallet error, got {other:?}"),
        }
        assert_eq!(err.client_code(), "D102");
    }

    #[test]
    fn internal_class_maps_to_500() {
        assert_eq!(PayBridgeError::Timeout("abc".into()).client_code(), "500");
        assert_eq!(PayBridgeError::UnexpectedKey("x".into()).client_code(), "500");
        assert_eq!(PayBridgeError::Validation("p".into()).client_code(), "400");
    }
}
