//! Shared application state for the paybridge gateway.
//!
//! Wires the channel server, the mode-dependent stores (channel broker,
//! wallet HTTP client or noop), and the services consumed by the HTTP layer.

use std::sync::Arc;

use tokio::time::Duration;

use paybridge_core::error::Result;

use crate::broker::ChannelBroker;
use crate::channel::{register_protocol_forwarders, ChannelServer};
use crate::config::{GatewayConfig, TransportMode};
use crate::obs::GatewayMetrics;
use crate::service::{PaymentService, PaymentWriter, ProofService, ProofWriter, TermsReader, TermsService};
use crate::wallet::{NoopStore, WalletClient};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    server: Arc<ChannelServer>,
    metrics: Arc<GatewayMetrics>,
    terms: TermsService,
    payments: PaymentService,
    proofs: ProofService,
}

impl AppState {
    /// Build application state. Returns Result so main can handle errors
    /// gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let metrics = Arc::new(GatewayMetrics::default());
        let server = Arc::new(ChannelServer::new(cfg.channel.max_message_bytes));
        register_protocol_forwarders(&server);

        // lifecycle gauges follow the channel server's hooks
        {
            let m = metrics.clone();
            server.on_client_join(move |_, _| m.connections_active.inc());
        }
        {
            let m = metrics.clone();
            server.on_client_leave(move |_, _| m.connections_active.dec());
        }
        {
            let m = metrics.clone();
            server.on_channel_create(move |_| m.channels_active.inc());
        }
        {
            let m = metrics.clone();
            server.on_channel_close(move |_| m.channels_active.dec());
        }

        let (terms_reader, payment_writer, proof_writer): (
            Arc<dyn TermsReader>,
            Arc<dyn PaymentWriter>,
            Arc<dyn ProofWriter>,
        ) = if cfg.wallet.noop {
            let noop = Arc::new(NoopStore::new());
            (noop.clone(), noop.clone(), noop)
        } else {
            match cfg.mode {
                TransportMode::Hybrid => {
                    let broker = Arc::new(ChannelBroker::new(
                        server.clone(),
                        Duration::from_millis(cfg.channel.await_timeout_ms),
                    ));
                    (broker.clone(), broker.clone(), broker)
                }
                TransportMode::Wallet => {
                    let client = Arc::new(WalletClient::new(&cfg.wallet)?);
                    (client.clone(), client.clone(), client)
                }
            }
        };

        let terms = TermsService::new(terms_reader, cfg.mode, cfg.server.fqdn.clone());
        let payments = PaymentService::new(payment_writer);
        let proofs = ProofService::new(proof_writer);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                server,
                metrics,
                terms,
                payments,
                proofs,
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn channel_server(&self) -> Arc<ChannelServer> {
        Arc::clone(&self.inner.server)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }

    pub fn terms(&self) -> &TermsService {
        &self.inner.terms
    }

    pub fn payments(&self) -> &PaymentService {
        &self.inner.payments
    }

    pub fn proofs(&self) -> &ProofService {
        &self.inner.proofs
    }
}
