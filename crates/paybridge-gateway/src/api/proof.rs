//! Proof endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use paybridge_core::protocol::ProofEnvelope;

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::service::ProofArgs;

#[derive(Debug, Deserialize)]
pub struct ProofQuery {
    #[serde(rename = "paymentReference")]
    pub payment_reference: String,
}

/// `POST /api/v1/proofs/:txID?paymentReference=…` — forward a merkle proof
/// to the wallet holding the payment.
pub async fn proof_create(
    State(app): State<AppState>,
    Path(tx_id): Path<String>,
    Query(q): Query<ProofQuery>,
    Json(proof): Json<ProofEnvelope>,
) -> Result<StatusCode, ApiError> {
    app.proofs()
        .proof_create(
            ProofArgs {
                payment_reference: q.payment_reference,
                tx_id,
            },
            proof,
        )
        .await?;
    Ok(StatusCode::CREATED)
}
