//! Protocol modules: channel envelope and DPP wire types.
//!
//! The envelope is the unit of communication on a channel; the remaining
//! modules define the DPP messages carried in envelope bodies (and over
//! plain HTTP in direct-wallet mode). Bodies are stored as raw JSON and
//! decoded lazily, so malformed wallet payloads surface as `PayBridgeError`
//! at bind time instead of breaking the transport.

pub mod envelope;
pub mod payment;
pub mod proof;
pub mod routes;
pub mod terms;

pub use envelope::Envelope;
pub use payment::{HybridPayment, HybridPaymentAck, Originator, Payment, PaymentAck, PeerChannelData};
pub use proof::ProofEnvelope;
pub use terms::{
    Beneficiary, HybridTerms, Inputs, NativeInput, NativeOutput, Outputs, PaymentTerms, Policies,
    TermsModes, TransactionTerms,
};
