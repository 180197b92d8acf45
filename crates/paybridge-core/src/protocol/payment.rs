//! Payment and PaymentACK messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PayBridgeError, Result};

/// Data about the payer, optionally attached to a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Originator {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paymail: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "extendedData", default, skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<BTreeMap<String, serde_json::Value>>,
}

/// Hybrid-mode payment payload: the chosen option and the signed
/// transactions that fully pay the terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HybridPayment {
    /// Id of the chosen payment option.
    #[serde(rename = "optionId")]
    pub option_id: String,
    /// Hex-encoded signed transactions, in terms order.
    pub transactions: Vec<String>,
    /// Ancestry info per txid, needed when SPV is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<BTreeMap<String, serde_json::Value>>,
}

/// Payment message submitted by the payer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Mode chosen from the PaymentTerms modes map.
    #[serde(rename = "modeId")]
    pub mode_id: String,
    /// Mode-specific payload.
    pub mode: HybridPayment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator: Option<Originator>,
    /// Deprecated single-transaction field kept for BIP-270 compatibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Payment {
    /// Ensure the payment message is complete before it is forwarded.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.mode_id.is_empty() {
            missing.push("modeId");
        }
        if self.mode.option_id.is_empty() {
            missing.push("mode.optionId");
        }
        if self.mode.transactions.is_empty() {
            missing.push("mode.transactions");
        }
        if missing.is_empty() {
            return Ok(());
        }
        Err(PayBridgeError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Peer channel information for subscribing to proof delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerChannelData {
    pub host: String,
    pub path: String,
    #[serde(rename = "channel_id")]
    pub channel_id: String,
    pub token: String,
}

/// Hybrid-mode acknowledgement payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridPaymentAck {
    #[serde(rename = "transactionIds", default)]
    pub transaction_ids: Vec<String>,
    #[serde(rename = "peerChannel", default, skip_serializing_if = "Option::is_none")]
    pub peer_channel: Option<PeerChannelData>,
}

/// PaymentACK message returned by the wallet.
///
/// A non-zero `error` in an otherwise successful reply marks a business-level
/// rejection, distinguished from transport failures by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAck {
    #[serde(rename = "modeId", default)]
    pub mode_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<HybridPaymentAck>,
    #[serde(rename = "peerChannel", default, skip_serializing_if = "Option::is_none")]
    pub peer_channel: Option<PeerChannelData>,
    #[serde(rename = "redirectUrl", default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// May explain why the payment was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// 0 or absent means accepted; any positive value is a rejection.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub error: i32,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

impl PaymentAck {
    /// Whether the wallet rejected the payment at the business level.
    pub fn rejected(&self) -> bool {
        self.error > 0
    }
}
