use serde::Deserialize;

use paybridge_core::error::{PayBridgeError, Result};

/// How the gateway reaches the wallet backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Payment exchange travels over a persistent channel connection held
    /// open by the wallet.
    Hybrid,
    /// Plain request/response HTTP calls to the wallet.
    Wallet,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default = "default_mode")]
    pub mode: TransportMode,

    #[serde(default)]
    pub wallet: WalletSection,

    #[serde(default)]
    pub channel: ChannelSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PayBridgeError::Validation(
                "config version must be 1".into(),
            ));
        }
        if self.server.fqdn.is_empty() {
            return Err(PayBridgeError::Validation(
                "server.fqdn must not be empty".into(),
            ));
        }
        self.channel.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Externally reachable host, used to form the payment URL handed to
    /// clients. May differ from `listen` behind a proxy.
    #[serde(default = "default_fqdn")]
    pub fqdn: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            fqdn: default_fqdn(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletSection {
    #[serde(default = "default_wallet_host")]
    pub host: String,

    #[serde(default = "default_wallet_port")]
    pub port: u16,

    /// Use https when talking to the wallet.
    #[serde(default)]
    pub secure: bool,

    /// Serve canned responses instead of calling a wallet. Useful for
    /// exploring the endpoints without one.
    #[serde(default)]
    pub noop: bool,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            host: default_wallet_host(),
            port: default_wallet_port(),
            secure: false,
            noop: false,
        }
    }
}

impl WalletSection {
    /// Base URL of the wallet's payment-protocol API.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSection {
    /// Bound applied to every awaited channel request.
    #[serde(default = "default_await_timeout_ms")]
    pub await_timeout_ms: u64,

    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for ChannelSection {
    fn default() -> Self {
        Self {
            await_timeout_ms: default_await_timeout_ms(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

impl ChannelSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=120_000).contains(&self.await_timeout_ms) {
            return Err(PayBridgeError::Validation(
                "channel.await_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        if self.max_message_bytes < 1024 {
            return Err(PayBridgeError::Validation(
                "channel.max_message_bytes must be at least 1024".into(),
            ));
        }
        Ok(())
    }
}

fn default_mode() -> TransportMode {
    TransportMode::Hybrid
}
fn default_listen() -> String {
    "0.0.0.0:8445".into()
}
fn default_fqdn() -> String {
    "localhost:8445".into()
}
fn default_wallet_host() -> String {
    "payd".into()
}
fn default_wallet_port() -> u16 {
    8443
}
fn default_await_timeout_ms() -> u64 {
    10_000
}
fn default_max_message_bytes() -> usize {
    65_536
}
