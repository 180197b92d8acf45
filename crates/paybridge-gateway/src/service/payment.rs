//! Payment service.

use std::sync::Arc;

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::{Payment, PaymentAck};

use crate::service::{PaymentArgs, PaymentWriter};

/// Validates payments and hands them to the configured writer for
/// processing by the wallet.
pub struct PaymentService {
    writer: Arc<dyn PaymentWriter>,
}

impl PaymentService {
    pub fn new(writer: Arc<dyn PaymentWriter>) -> Self {
        Self { writer }
    }

    pub async fn payment_create(&self, args: PaymentArgs, payment: Payment) -> Result<PaymentAck> {
        if args.payment_id.is_empty() {
            return Err(PayBridgeError::Validation("paymentID must not be empty".into()));
        }
        payment.validate()?;

        let ack = self.writer.payment_create(args.clone(), payment).await?;
        if ack.rejected() {
            tracing::warn!(payment_id = %args.payment_id, memo = ?ack.memo, "payment rejected by wallet");
        }
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use paybridge_core::protocol::HybridPayment;

    struct StubWriter {
        ack: PaymentAck,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PaymentWriter for StubWriter {
        async fn payment_create(&self, _args: PaymentArgs, _payment: Payment) -> Result<PaymentAck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ack.clone())
        }
    }

    fn payment() -> Payment {
        Payment {
            mode_id: "ef63d9775da5".into(),
            mode: HybridPayment {
                option_id: "choiceID0".into(),
                transactions: vec!["0100beef".into()],
                ancestors: None,
            },
            ..Payment::default()
        }
    }

    #[tokio::test]
    async fn valid_payment_reaches_the_writer() {
        let writer = Arc::new(StubWriter {
            ack: PaymentAck::default(),
            calls: AtomicUsize::new(0),
        });
        let svc = PaymentService::new(writer.clone());

        let ack = svc
            .payment_create(
                PaymentArgs {
                    payment_id: "abc123".into(),
                },
                payment(),
            )
            .await
            .unwrap();
        assert!(!ack.rejected());
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_payment_never_reaches_the_writer() {
        let writer = Arc::new(StubWriter {
            ack: PaymentAck::default(),
            calls: AtomicUsize::new(0),
        });
        let svc = PaymentService::new(writer.clone());

        let mut bad = payment();
        bad.mode.transactions.clear();
        let err = svc
            .payment_create(
                PaymentArgs {
                    payment_id: "abc123".into(),
                },
                bad,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PayBridgeError::Validation(_)));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn business_rejection_is_returned_not_raised() {
        let writer = Arc::new(StubWriter {
            ack: PaymentAck {
                error: 1,
                memo: Some("insufficient fees".into()),
                ..PaymentAck::default()
            },
            calls: AtomicUsize::new(0),
        });
        let svc = PaymentService::new(writer);

        let ack = svc
            .payment_create(
                PaymentArgs {
                    payment_id: "abc123".into(),
                },
                payment(),
            )
            .await
            .unwrap();
        assert!(ack.rejected());
        assert_eq!(ack.memo.as_deref(), Some("insufficient fees"));
    }
}
