//! Merkle proof envelope, forwarded verbatim to the wallet.

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping a merkle proof payload and an optional signature
/// over it. The gateway treats the payload as opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEnvelope {
    /// Serialized proof, encoded per `encoding`.
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(rename = "publicKey", default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub mimetype: String,
}
