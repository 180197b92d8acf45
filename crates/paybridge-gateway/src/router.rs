//! Axum router wiring.
//!
//! Payment endpoints are always registered; the channel upgrade endpoint
//! only exists in hybrid mode, where a wallet holds its channel open.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, config::TransportMode, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/v1/payment/:payment_id",
            get(api::payment_terms).post(api::payment_create),
        )
        .route("/api/v1/proofs/:tx_id", post(api::proof_create))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics));

    if state.cfg().mode == TransportMode::Hybrid {
        router = router.route("/ws/:channel_id", get(transport::ws::ws_upgrade));
    }

    router.with_state(state)
}
