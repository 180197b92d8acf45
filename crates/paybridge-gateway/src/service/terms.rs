//! Payment-terms service.
//!
//! Acts as a pass-through to the configured store, with response-shape
//! checks that catch a wallet replying without fully populating its terms,
//! and the hybrid-mode payment URL rewrite that keeps clients coming back
//! through this gateway.

use std::sync::Arc;

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::PaymentTerms;

use crate::config::TransportMode;
use crate::service::{TermsArgs, TermsReader};

pub struct TermsService {
    reader: Arc<dyn TermsReader>,
    mode: TransportMode,
    fqdn: String,
}

impl TermsService {
    pub fn new(reader: Arc<dyn TermsReader>, mode: TransportMode, fqdn: impl Into<String>) -> Self {
        Self {
            reader,
            mode,
            fqdn: fqdn.into(),
        }
    }

    /// Validate the request, read the terms, and sanity-check the reply
    /// before it reaches the HTTP layer.
    pub async fn create_payment_terms(&self, args: TermsArgs) -> Result<PaymentTerms> {
        if args.payment_id.is_empty() {
            return Err(PayBridgeError::Validation("paymentID must not be empty".into()));
        }

        let mut terms = self
            .reader
            .payment_terms(args.clone())
            .await
            .map_err(|e| match e {
                PayBridgeError::NotFound(_) | PayBridgeError::Validation(_) | PayBridgeError::Wallet { .. } => e,
                wrapped => PayBridgeError::Internal(format!(
                    "failed to read payment terms for paymentID {}: {wrapped}",
                    args.payment_id
                )),
            })?;

        let txs = terms.choice_transactions().ok_or_else(|| {
            PayBridgeError::MalformedResponse(format!(
                "unsupported payment mode for paymentID {}",
                args.payment_id
            ))
        })?;
        let first = txs.first().ok_or_else(|| {
            PayBridgeError::MalformedResponse(format!(
                "unsupported payment mode for paymentID {}",
                args.payment_id
            ))
        })?;

        if first.outputs.native.is_empty() {
            return Err(PayBridgeError::MalformedResponse(format!(
                "no outputs received for paymentID {}",
                args.payment_id
            )));
        }
        if first
            .policies
            .as_ref()
            .map_or(true, |p| p.fee_rate.is_none())
        {
            return Err(PayBridgeError::MalformedResponse(format!(
                "no fees received for paymentID {}",
                args.payment_id
            )));
        }

        // In hybrid mode the wallet sits behind its channel connection and
        // may report an internal address; point clients back at this gateway.
        if self.mode == TransportMode::Hybrid {
            terms.payment_url = format!("http://{}/api/v1/payment/{}", self.fqdn, args.payment_id);
        }

        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use paybridge_core::protocol::{
        HybridTerms, NativeOutput, Outputs, Policies, TermsModes, TransactionTerms,
    };

    struct StubReader {
        terms: std::result::Result<PaymentTerms, fn() -> PayBridgeError>,
        calls: AtomicUsize,
    }

    impl StubReader {
        fn ok(terms: PaymentTerms) -> Self {
            Self {
                terms: Ok(terms),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TermsReader for StubReader {
        async fn payment_terms(&self, _args: TermsArgs) -> Result<PaymentTerms> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.terms {
                Ok(t) => Ok(t.clone()),
                Err(mk) => Err(mk()),
            }
        }
    }

    fn well_formed_terms() -> PaymentTerms {
        let tx = TransactionTerms {
            outputs: Outputs {
                native: vec![NativeOutput {
                    amount: 1000,
                    locking_script: "76a91493d0d43918a5df78f08cfe22a4e022846b6736c288ac".into(),
                    description: None,
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
        choice.insert("transactions".to_string(), vec![tx]);
        let mut hybrid = HybridTerms::new();
        hybrid.insert("choiceID0".to_string(), choice);

        PaymentTerms {
            network: "regtest".into(),
            version: "1.0".into(),
            creation_timestamp: 1_648_163_657,
            expiration_timestamp: 1_648_250_057,
            payment_url: "http://payd:8443/api/v1/payment/abc123".into(),
            memo: Some("invoice abc123".into()),
            beneficiary: None,
            modes: Some(TermsModes { hybrid }),
        }
    }

    fn args() -> TermsArgs {
        TermsArgs {
            payment_id: "abc123".into(),
        }
    }

    #[tokio::test]
    async fn hybrid_mode_rewrites_only_the_payment_url() {
        let reader = Arc::new(StubReader::ok(well_formed_terms()));
        let svc = TermsService::new(reader, TransportMode::Hybrid, "dpp.merchant.example");

        let got = svc.create_payment_terms(args()).await.unwrap();
        assert_eq!(
            got.payment_url,
            "http://dpp.merchant.example/api/v1/payment/abc123"
        );

        // everything but the URL is returned verbatim
        let mut expected = well_formed_terms();
        expected.payment_url = got.payment_url.clone();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn wallet_mode_keeps_the_reported_url() {
        let reader = Arc::new(StubReader::ok(well_formed_terms()));
        let svc = TermsService::new(reader, TransportMode::Wallet, "dpp.merchant.example");

        let got = svc.create_payment_terms(args()).await.unwrap();
        assert_eq!(got.payment_url, "http://payd:8443/api/v1/payment/abc123");
    }

    #[tokio::test]
    async fn empty_payment_id_fails_without_touching_the_reader() {
        let reader = Arc::new(StubReader::ok(well_formed_terms()));
        let svc = TermsService::new(reader.clone(), TransportMode::Hybrid, "fqdn");

        let err = svc
            .create_payment_terms(TermsArgs {
                payment_id: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PayBridgeError::Validation(_)));
        assert_eq!(reader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_outputs_is_rejected() {
        let mut terms = well_formed_terms();
        if let Some(modes) = terms.modes.as_mut() {
            let txs = modes
                .hybrid
                .get_mut("choiceID0")
                .unwrap()
                .get_mut("transactions")
                .unwrap();
            txs[0].outputs.native.clear();
        }
        let svc = TermsService::new(Arc::new(StubReader::ok(terms)), TransportMode::Hybrid, "fqdn");

        let err = svc.create_payment_terms(args()).await.unwrap_err();
        assert_eq!(err.to_string(), "no outputs received for paymentID abc123");
    }

    #[tokio::test]
    async fn missing_fee_policy_is_rejected() {
        let mut terms = well_formed_terms();
        if let Some(modes) = terms.modes.as_mut() {
            let txs = modes
                .hybrid
                .get_mut("choiceID0")
                .unwrap()
                .get_mut("transactions")
                .unwrap();
            txs[0].policies = Some(Policies::default());
        }
        let svc = TermsService::new(Arc::new(StubReader::ok(terms)), TransportMode::Hybrid, "fqdn");

        let err = svc.create_payment_terms(args()).await.unwrap_err();
        assert_eq!(err.to_string(), "no fees received for paymentID abc123");
    }

    #[tokio::test]
    async fn reply_without_the_supported_mode_is_rejected() {
        let mut terms = well_formed_terms();
        terms.modes = Some(TermsModes::default());
        let svc = TermsService::new(Arc::new(StubReader::ok(terms)), TransportMode::Hybrid, "fqdn");

        let err = svc.create_payment_terms(args()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported payment mode for paymentID abc123"
        );
    }

    #[tokio::test]
    async fn reader_not_found_passes_through_untouched() {
        let reader = Arc::new(StubReader {
            terms: Err(|| PayBridgeError::NotFound("payment abc123 not found".into())),
            calls: AtomicUsize::new(0),
        });
        let svc = TermsService::new(reader, TransportMode::Hybrid, "fqdn");

        let err = svc.create_payment_terms(args()).await.unwrap_err();
        assert!(matches!(err, PayBridgeError::NotFound(_)));
    }
}
