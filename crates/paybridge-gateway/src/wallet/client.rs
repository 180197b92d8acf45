//! HTTP wallet store.
//!
//! Direct-mode counterpart of the channel broker: the same store traits
//! implemented over the wallet's payment-protocol REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::{Payment, PaymentAck, PaymentTerms, ProofEnvelope};

use crate::config::WalletSection;
use crate::service::{PaymentArgs, PaymentWriter, ProofArgs, ProofWriter, TermsArgs, TermsReader};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WalletClient {
    http: reqwest::Client,
    base_url: String,
}

impl WalletClient {
    pub fn new(cfg: &WalletSection) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if !cfg.secure {
            // test setups run the wallet with a self-signed cert
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| PayBridgeError::Internal(format!("failed to build wallet client: {e}")))?;
        Ok(Self {
            http,
            base_url: cfg.base_url(),
        })
    }

    fn payments_url(&self, payment_id: &str) -> String {
        format!("{}/api/v1/payments/{payment_id}", self.base_url)
    }

    fn proofs_url(&self, tx_id: &str) -> String {
        format!("{}/api/v1/proofs/{tx_id}", self.base_url)
    }

    /// Execute a request and verify the response status. A wallet 404 maps
    /// to the not-found domain error; any other unexpected status surfaces
    /// as an internal error carrying the response body.
    async fn send<B: Serialize>(
        &self,
        req: reqwest::RequestBuilder,
        body: Option<&B>,
        expect: StatusCode,
        endpoint: &str,
    ) -> Result<reqwest::Response> {
        let req = match body {
            Some(b) => req.json(b),
            None => req,
        };
        let resp = req.send().await.map_err(|e| {
            PayBridgeError::Transport(format!("wallet request to '{endpoint}' failed: {e}"))
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PayBridgeError::NotFound(format!(
                "wallet has no record for '{endpoint}'"
            )));
        }
        if status != expect {
            let body = resp.text().await.unwrap_or_default();
            return Err(PayBridgeError::Internal(format!(
                "wallet request to '{endpoint}' returned status {status}, expected {expect}: {body}"
            )));
        }
        Ok(resp)
    }
}

#[async_trait]
impl TermsReader for WalletClient {
    async fn payment_terms(&self, args: TermsArgs) -> Result<PaymentTerms> {
        let url = self.payments_url(&args.payment_id);
        let resp = self
            .send::<()>(self.http.get(&url), None, StatusCode::OK, &url)
            .await?;
        resp.json().await.map_err(|e| {
            PayBridgeError::Decode(format!("failed to decode payment terms from '{url}': {e}"))
        })
    }
}

#[async_trait]
impl PaymentWriter for WalletClient {
    async fn payment_create(&self, args: PaymentArgs, payment: Payment) -> Result<PaymentAck> {
        let url = self.payments_url(&args.payment_id);
        let resp = self
            .send(self.http.post(&url), Some(&payment), StatusCode::CREATED, &url)
            .await?;
        resp.json().await.map_err(|e| {
            PayBridgeError::Decode(format!("failed to decode payment ack from '{url}': {e}"))
        })
    }
}

#[async_trait]
impl ProofWriter for WalletClient {
    async fn proof_create(&self, args: ProofArgs, proof: ProofEnvelope) -> Result<()> {
        let url = self.proofs_url(&args.tx_id);
        self.send(self.http.post(&url), Some(&proof), StatusCode::CREATED, &url)
            .await?;
        Ok(())
    }
}
