//! Channel request broker.
//!
//! Implements the payment-protocol store traits by encoding requests as
//! envelopes, sending them over the channel named by the payment id, and
//! awaiting a correlated reply. This is how a synchronous inbound HTTP call
//! is satisfied by a wallet that can only be reached over its outbound
//! channel connection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Duration;

use paybridge_core::error::{ClientError, PayBridgeError, Result};
use paybridge_core::protocol::{routes, Envelope, Payment, PaymentAck, PaymentTerms, ProofEnvelope};

use crate::channel::ChannelServer;
use crate::service::{PaymentArgs, PaymentWriter, ProofArgs, ProofWriter, TermsArgs, TermsReader};

/// Broker sending protocol requests over channel connections.
pub struct ChannelBroker {
    server: Arc<ChannelServer>,
    await_timeout: Duration,
}

impl ChannelBroker {
    pub fn new(server: Arc<ChannelServer>, await_timeout: Duration) -> Self {
        Self {
            server,
            await_timeout,
        }
    }

    /// Send an awaited request and decode the reply by route: the success
    /// route binds to `T`, the error route binds to a wallet error payload
    /// and is translated, anything else is a protocol violation.
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        channel_id: &str,
        env: Envelope,
        success_key: &str,
        error_key: &str,
        op: &str,
    ) -> Result<T> {
        let reply = self
            .server
            .broadcast_await(channel_id, env, self.await_timeout)
            .await
            .map_err(|e| wrap_transport(e, op, channel_id))?;

        if reply.key == success_key {
            return reply.bind::<T>();
        }
        if reply.key == error_key {
            let client_err: ClientError = reply.bind()?;
            return Err(client_err.into());
        }
        Err(PayBridgeError::UnexpectedKey(reply.key))
    }
}

/// Channel-not-found stays a not-found domain error; every other transport
/// failure, timeouts included, wraps into the internal class with the
/// operation and payment id it concerns.
fn wrap_transport(e: PayBridgeError, op: &str, payment_id: &str) -> PayBridgeError {
    match e {
        PayBridgeError::NotFound(_) => e,
        other => PayBridgeError::Internal(format!(
            "failed to send {op} message for paymentID {payment_id}: {other}"
        )),
    }
}

#[async_trait]
impl TermsReader for ChannelBroker {
    async fn payment_terms(&self, args: TermsArgs) -> Result<PaymentTerms> {
        let env = Envelope::new(routes::ROUTE_TERMS_CREATE, &args.payment_id)
            .with_correlation(uuid::Uuid::new_v4().to_string());

        self.request(
            &args.payment_id,
            env,
            routes::ROUTE_TERMS_RESPONSE,
            routes::ROUTE_TERMS_ERROR,
            "payment terms",
        )
        .await
    }
}

#[async_trait]
impl PaymentWriter for ChannelBroker {
    async fn payment_create(&self, args: PaymentArgs, payment: Payment) -> Result<PaymentAck> {
        let env = Envelope::new(routes::ROUTE_PAYMENT, &args.payment_id)
            .with_correlation(uuid::Uuid::new_v4().to_string())
            .with_body(&payment)?;

        self.request(
            &args.payment_id,
            env,
            routes::ROUTE_PAYMENT_ACK,
            routes::ROUTE_PAYMENT_ERROR,
            "payment",
        )
        .await
    }
}

#[async_trait]
impl ProofWriter for ChannelBroker {
    /// Fire-and-forget: no reply is awaited, so delivery cannot be confirmed
    /// beyond the broadcast itself. The correlation id is the transaction id
    /// rather than a random token, with a header carrying it redundantly.
    async fn proof_create(&self, args: ProofArgs, proof: ProofEnvelope) -> Result<()> {
        let env = Envelope::new(routes::ROUTE_PROOF_CREATE, &args.payment_reference)
            .with_correlation(&args.tx_id)
            .with_header(routes::HEADER_TX_ID, &args.tx_id)
            .with_body(&proof)?;

        self.server.broadcast(&args.payment_reference, &env)
    }
}
