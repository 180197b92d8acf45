//! Channel message envelope.
//!
//! The body is stored as `RawValue` to enable lazy decoding: the transport
//! only needs the routing fields, and the typed body is bound exactly once
//! by whoever awaits the message.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{PayBridgeError, Result};
use crate::protocol::routes;

/// The unit of communication on a channel.
///
/// `channel_id` must equal the payment identifier of the flow the envelope
/// belongs to; the transport server routes by this value, never by
/// `correlation_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Route key selecting the logical operation (e.g. "paymentterms.create").
    pub key: String,
    /// Protocol family namespace, constant for this gateway.
    #[serde(rename = "appID")]
    pub app_id: String,
    /// Payment/invoice identifier; names the channel the envelope travels on.
    #[serde(rename = "channelID")]
    pub channel_id: String,
    /// Token pairing a request envelope with its reply envelope.
    #[serde(rename = "correlationID", default)]
    pub correlation_id: String,
    /// Ordered key/value metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Opaque payload, stored as raw JSON (lazy decoding).
    #[serde(default)]
    pub body: Option<Box<RawValue>>,
}

impl Envelope {
    /// Build an empty-bodied envelope for a route, addressed to a channel.
    pub fn new(key: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            app_id: routes::APP_ID.to_string(),
            channel_id: channel_id.into(),
            correlation_id: String::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Set the correlation id pairing this request with its reply.
    pub fn with_correlation(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Attach a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serialize a typed body into the envelope.
    pub fn with_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let raw = serde_json::value::to_raw_value(body)
            .map_err(|e| PayBridgeError::Decode(format!("failed to encode envelope body: {e}")))?;
        self.body = Some(raw);
        Ok(self)
    }

    /// Bind the stored body into a typed value. Fails with a decode error if
    /// the body is absent or does not match the requested shape.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self
            .body
            .as_ref()
            .ok_or_else(|| PayBridgeError::Decode(format!("envelope '{}' has no body", self.key)))?;
        serde_json::from_str(raw.get()).map_err(|e| {
            PayBridgeError::Decode(format!("failed to bind body of envelope '{}': {e}", self.key))
        })
    }
}
