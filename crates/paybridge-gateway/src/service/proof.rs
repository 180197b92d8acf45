//! Proof service.

use std::sync::Arc;

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::ProofEnvelope;

use crate::service::{ProofArgs, ProofWriter};

/// Validates proof submissions and forwards them to the configured writer.
pub struct ProofService {
    writer: Arc<dyn ProofWriter>,
}

impl ProofService {
    pub fn new(writer: Arc<dyn ProofWriter>) -> Self {
        Self { writer }
    }

    pub async fn proof_create(&self, args: ProofArgs, proof: ProofEnvelope) -> Result<()> {
        let mut missing = Vec::new();
        if args.payment_reference.is_empty() {
            missing.push("paymentReference");
        }
        if args.tx_id.is_empty() {
            missing.push("txId");
        }
        if !missing.is_empty() {
            return Err(PayBridgeError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        self.writer.proof_create(args, proof).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    #[derive(Default)]
    struct StubWriter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProofWriter for StubWriter {
        async fn proof_create(&self, _args: ProofArgs, _proof: ProofEnvelope) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn complete_args_are_forwarded() {
        let writer = Arc::new(StubWriter::default());
        let svc = ProofService::new(writer.clone());
        svc.proof_create(
            ProofArgs {
                payment_reference: "abc123".into(),
                tx_id: "deadbeef".into(),
            },
            ProofEnvelope::default(),
        )
        .await
        .unwrap();
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_reference_is_rejected_before_the_writer() {
        let writer = Arc::new(StubWriter::default());
        let svc = ProofService::new(writer.clone());
        let err = svc
            .proof_create(
                ProofArgs {
                    payment_reference: String::new(),
                    tx_id: "deadbeef".into(),
                },
                ProofEnvelope::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PayBridgeError::Validation(_)));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }
}
