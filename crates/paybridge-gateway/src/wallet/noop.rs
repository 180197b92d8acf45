//! No-op data store.
//!
//! Serves canned responses so the endpoints can be explored without a
//! wallet behind them.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use paybridge_core::error::Result;
use paybridge_core::protocol::terms::{CHOICE_ID0, TRANSACTIONS_KEY};
use paybridge_core::protocol::{
    HybridTerms, NativeOutput, Outputs, Payment, PaymentAck, PaymentTerms, Policies, ProofEnvelope,
    TermsModes, TransactionTerms,
};

use crate::service::{PaymentArgs, PaymentWriter, ProofArgs, ProofWriter, TermsArgs, TermsReader};

pub struct NoopStore;

impl NoopStore {
    pub fn new() -> Self {
        tracing::info!("using NOOP data store");
        Self
    }
}

impl Default for NoopStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64
}

#[async_trait]
impl TermsReader for NoopStore {
    async fn payment_terms(&self, args: TermsArgs) -> Result<PaymentTerms> {
        let tx = TransactionTerms {
            outputs: Outputs {
                native: vec![NativeOutput {
                    amount: 1000,
                    locking_script: "76a91493d0d43918a5df78f08cfe22a4e022846b6736c288ac".into(),
                    description: Some("noop description".into()),
                }],
            },
            inputs: Default::default(),
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

        let now = unix_now();
        Ok(PaymentTerms {
            network: "noop".into(),
            version: "1.0".into(),
            creation_timestamp: now,
            expiration_timestamp: now + 3600,
            payment_url: "noop".into(),
            memo: Some(format!("noop terms for {}", args.payment_id)),
            beneficiary: None,
            modes: Some(TermsModes { hybrid }),
        })
    }
}

#[async_trait]
impl PaymentWriter for NoopStore {
    async fn payment_create(&self, _args: PaymentArgs, _payment: Payment) -> Result<PaymentAck> {
        tracing::info!("hit noop payment_create");
        Ok(PaymentAck::default())
    }
}

#[async_trait]
impl ProofWriter for NoopStore {
    async fn proof_create(&self, _args: ProofArgs, _proof: ProofEnvelope) -> Result<()> {
        tracing::info!("hit noop proof_create");
        Ok(())
    }
}
