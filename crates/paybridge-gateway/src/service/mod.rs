//! Payment-protocol services and the store traits they depend on.
//!
//! Services enforce validation and business rules; stores move the messages,
//! either over a channel connection (`broker`), over plain HTTP to the
//! wallet (`wallet::client`), or not at all (`wallet::noop`).

pub mod payment;
pub mod proof;
pub mod terms;

use async_trait::async_trait;

use paybridge_core::error::Result;
use paybridge_core::protocol::{Payment, PaymentAck, PaymentTerms, ProofEnvelope};

pub use payment::PaymentService;
pub use proof::ProofService;
pub use terms::TermsService;

/// Arguments identifying the invoice a terms request concerns.
#[derive(Debug, Clone)]
pub struct TermsArgs {
    pub payment_id: String,
}

/// Arguments identifying the invoice a payment concerns.
#[derive(Debug, Clone)]
pub struct PaymentArgs {
    pub payment_id: String,
}

/// Arguments identifying the payment a proof belongs to.
#[derive(Debug, Clone)]
pub struct ProofArgs {
    pub payment_reference: String,
    pub tx_id: String,
}

/// Reads payment terms from an underlying wallet.
#[async_trait]
pub trait TermsReader: Send + Sync {
    async fn payment_terms(&self, args: TermsArgs) -> Result<PaymentTerms>;
}

/// Writes a payment to an underlying wallet for processing.
#[async_trait]
pub trait PaymentWriter: Send + Sync {
    async fn payment_create(&self, args: PaymentArgs, payment: Payment) -> Result<PaymentAck>;
}

/// Forwards a merkle proof to an underlying wallet.
#[async_trait]
pub trait ProofWriter: Send + Sync {
    async fn proof_create(&self, args: ProofArgs, proof: ProofEnvelope) -> Result<()>;
}
