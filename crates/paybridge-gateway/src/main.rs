//! paybridge gateway binary.
//!
//! BIP-270/DPP payment-protocol gateway. In hybrid mode the wallet reaches
//! us over a persistent channel connection and synchronous HTTP calls are
//! bridged onto it; in wallet mode we call the wallet's REST API directly.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use paybridge_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path =
        std::env::var("PAYBRIDGE_CONFIG").unwrap_or_else(|_| "paybridge.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("failed to build application state");
    let app = router::build_router(state);

    tracing::info!(%listen, "paybridge-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
