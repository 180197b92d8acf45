//! Channel lifecycle gateway.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS on `/ws/:channelID`
//! - Reject non-internal connections to channels that do not exist (404
//!   with a structured client error), so payers cannot open channels the
//!   wallet never registered
//! - Hand the socket to the channel server session loop; the connection is
//!   closed on all exit paths

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;

use paybridge_core::error::{PayBridgeError, Result};
use paybridge_core::protocol::Envelope;

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::channel::ChannelServer;

#[derive(Debug, Default, Deserialize)]
pub struct WsQuery {
    /// Marks a wallet-originated connection, allowed to create its channel.
    #[serde(default)]
    pub internal: Option<bool>,
}

/// Guard run before completing the upgrade: external connections may only
/// join channels the wallet has already opened.
pub(crate) fn ensure_channel(server: &ChannelServer, channel_id: &str, q: &WsQuery) -> Result<()> {
    if q.internal.unwrap_or(false) {
        return Ok(());
    }
    if server.has_channel(channel_id) {
        return Ok(());
    }
    Err(PayBridgeError::NotFound(format!(
        "channel {channel_id} not found"
    )))
}

pub async fn ws_upgrade(
    State(app): State<AppState>,
    Path(channel_id): Path<String>,
    Query(q): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let server = app.channel_server();
    if let Err(e) = ensure_channel(&server, &channel_id, &q) {
        return ApiError::from(e).into_response();
    }

    app.metrics().ws_upgrades.inc();
    ws.max_message_size(server.max_message_bytes())
        .on_upgrade(move |socket| run_session(app, server, socket, channel_id))
}

/// Session loop: attach to the channel, then pump frames both ways until
/// either side goes away.
async fn run_session(app: AppState, server: Arc<ChannelServer>, socket: WebSocket, channel_id: String) {
    let (peer, mut out_rx) = server.attach(&channel_id);
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(frame) => {
                        if ws_tx.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                match msg {
                    Message::Text(s) => {
                        app.metrics().channel_messages.inc();
                        match serde_json::from_str::<Envelope>(&s) {
                            Ok(env) => server.deliver(&peer, env).await,
                            Err(e) => {
                                tracing::warn!(channel = %peer.channel_id, client = %peer.client_id,
                                    "dropping undecodable frame: {e}");
                            }
                        }
                    }
                    Message::Binary(_) => {
                        tracing::warn!(channel = %peer.channel_id, "binary frames are not part of the protocol");
                    }
                    Message::Ping(_) | Message::Pong(_) => {}
                    Message::Close(_) => break,
                }
            }
        }
    }

    server.detach(&peer);
    let _ = ws_tx.send(Message::Close(None)).await;
}
