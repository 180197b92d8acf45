//! PaymentTerms message and the hybrid payment mode types.
//!
//! Wire-compatible with the TSC Direct Payment Protocol: the modes map is
//! keyed by the BRFC id of the (currently single) hybrid mode, and each
//! choice carries a list of requested transaction shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// BRFC id of the hybrid payment mode, the only mode this gateway supports.
pub const HYBRID_MODE_ID: &str = "ef63d9775da5";

/// Choice key of the single supported payment-mode option.
pub const CHOICE_ID0: &str = "choiceID0";

/// Key under a choice holding the requested transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// A native (non-token) output: satoshis against a hex locking script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeOutput {
    /// Number of satoshis to be paid.
    pub amount: u64,
    /// Locking script where payment should be sent, hex encoded.
    #[serde(rename = "script")]
    pub locking_script: String,
    /// Optional description such as "tip" or "sales tax".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Requirements for an input the payer should spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeInput {
    #[serde(rename = "scriptSig")]
    pub script_sig: String,
    pub txid: String,
    pub vout: u32,
    pub value: u64,
    #[serde(rename = "nSequence", default, skip_serializing_if = "Option::is_none")]
    pub n_sequence: Option<i32>,
}

/// Output options for one requested transaction. Only "native" outputs are
/// currently defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(rename = "native", default)]
    pub native: Vec<NativeOutput>,
}

/// Input options for one requested transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(rename = "native", default)]
    pub native: Vec<NativeInput>,
}

/// Fee and policy information the payer's wallet must honour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policies {
    /// Fee rates keyed by fee type then unit, in satoshis.
    #[serde(rename = "fees", default, skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<BTreeMap<String, BTreeMap<String, i64>>>,
    #[serde(rename = "SPVRequired", default)]
    pub spv_required: bool,
    #[serde(rename = "lockTime", default)]
    pub lock_time: u32,
}

/// A single requested transaction shape for the hybrid mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTerms {
    pub outputs: Outputs,
    #[serde(default, skip_serializing_if = "is_default_inputs")]
    pub inputs: Inputs,
    pub policies: Option<Policies>,
}

fn is_default_inputs(i: &Inputs) -> bool {
    i.native.is_empty()
}

/// Hybrid mode payload: choice id -> "transactions" -> requested shapes.
pub type HybridTerms = BTreeMap<String, BTreeMap<String, Vec<TransactionTerms>>>;

/// Payment-mode map of the PaymentTerms message, keyed by BRFC id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsModes {
    #[serde(rename = "ef63d9775da5", default)]
    pub hybrid: HybridTerms,
}

/// Data identifying the party being paid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(rename = "paymentReference", default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(rename = "extendedData", default, skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<BTreeMap<String, serde_json::Value>>,
}

/// PaymentTerms message: outputs, fee policy and expiry for an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Bitcoin network this payment should be made on.
    pub network: String,
    /// Version of the DPP spec the message conforms to.
    pub version: String,
    /// Unix timestamp (seconds, UTC) the terms were created.
    #[serde(rename = "creationTimestamp")]
    pub creation_timestamp: i64,
    /// Unix timestamp (seconds, UTC) after which the terms are invalid.
    #[serde(rename = "expirationTimestamp")]
    pub expiration_timestamp: i64,
    /// Location where the Payment message should be sent.
    #[serde(rename = "paymentUrl")]
    pub payment_url: String,
    /// Note displayed to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<Beneficiary>,
    /// Payment modes the customer can choose from.
    pub modes: Option<TermsModes>,
}

impl PaymentTerms {
    /// Look up the requested transaction shapes of the single supported
    /// payment-mode choice. Returns `None` when the reply does not carry the
    /// expected mode, which callers surface as an explicit unsupported-mode
    /// error rather than indexing blindly.
    pub fn choice_transactions(&self) -> Option<&[TransactionTerms]> {
        self.modes
            .as_ref()?
            .hybrid
            .get(CHOICE_ID0)?
            .get(TRANSACTIONS_KEY)
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn terms_with_mode() -> PaymentTerms {
        let tx = TransactionTerms {
            outputs: Outputs {
                native: vec![NativeOutput {
                    amount: 1000,
                    locking_script: "76a91455b61be43392125d127f1780fb038437cd67ef9c88ac".into(),
                    description: None,
                }],
            },
            inputs: Inputs::default(),
            policies: Some(Policies {
                fee_rate: Some(BTreeMap::from([(
                    "standard".to_string(),
                    BTreeMap::from([("satoshis".to_string(), 5i64)]),
                )])),
                ..Policies::default()
            }),
        };
        let mut choice = BTreeMap::new();
        choice.insert(TRANSACTIONS_KEY.to_string(), vec![tx]);
        let mut hybrid = HybridTerms::new();
        hybrid.insert(CHOICE_ID0.to_string(), choice);
        PaymentTerms {
            network: "mainnet".into(),
            version: "1.0".into(),
            creation_timestamp: 1_648_163_657,
            expiration_timestamp: 1_648_164_657,
            payment_url: "http://localhost:8445/api/v1/payment/abc123".into(),
            memo: Some("invoice abc123".into()),
            beneficiary: None,
            modes: Some(TermsModes { hybrid }),
        }
    }

    #[test]
    fn choice_lookup_finds_first_transaction() {
        let terms = terms_with_mode();
        let txs = terms.choice_transactions().unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].outputs.native[0].amount, 1000);
    }

    #[test]
    fn choice_lookup_is_none_without_modes() {
        let terms = PaymentTerms::default();
        assert!(terms.choice_transactions().is_none());
    }

    #[test]
    fn modes_map_serializes_under_brfc_id() {
        let terms = terms_with_mode();
        let json = serde_json::to_string(&terms).unwrap();
        assert!(json.contains("\"ef63d9775da5\""));
        assert!(json.contains("\"choiceID0\""));
        assert!(json.contains("\"paymentUrl\""));

        let back: PaymentTerms = serde_json::from_str(&json).unwrap();
        assert_eq!(back, terms);
    }
}
