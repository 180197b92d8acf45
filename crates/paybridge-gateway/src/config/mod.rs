//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use paybridge_core::error::{PayBridgeError, Result};

pub use schema::{ChannelSection, GatewayConfig, ServerSection, TransportMode, WalletSection};

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PayBridgeError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| PayBridgeError::Validation(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
