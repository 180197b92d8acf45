//! Payment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use paybridge_core::protocol::{Payment, PaymentTerms};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::service::{PaymentArgs, TermsArgs};

/// `GET /api/v1/payment/:paymentID` — payment terms for an invoice.
pub async fn payment_terms(
    State(app): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentTerms>, ApiError> {
    let terms = app
        .terms()
        .create_payment_terms(TermsArgs { payment_id })
        .await?;
    Ok(Json(terms))
}

/// `POST /api/v1/payment/:paymentID` — submit a payment.
///
/// A wallet-accepted payment returns 201; an ack carrying a non-zero error
/// is a business-level rejection and returns 422 with the ack body so the
/// payer can read the memo.
pub async fn payment_create(
    State(app): State<AppState>,
    Path(payment_id): Path<String>,
    Json(payment): Json<Payment>,
) -> Result<Response, ApiError> {
    let ack = app
        .payments()
        .payment_create(PaymentArgs { payment_id }, payment)
        .await?;

    let status = if ack.rejected() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(ack)).into_response())
}
