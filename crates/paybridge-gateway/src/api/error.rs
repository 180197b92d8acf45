//! HTTP mapping of domain errors.
//!
//! Every error leaves the gateway as the same structured client-error body
//! that travels over channels, with a fresh id for log correlation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use paybridge_core::error::{ClientError, PayBridgeError};

/// Response wrapper for `PayBridgeError` (newtype, since both the error and
/// `IntoResponse` live in other crates).
pub struct ApiError(pub PayBridgeError);

impl From<PayBridgeError> for ApiError {
    fn from(e: PayBridgeError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            PayBridgeError::Validation(_) => StatusCode::BAD_REQUEST,
            PayBridgeError::NotFound(_) => StatusCode::NOT_FOUND,
            // a wallet error may embed a usable status in its code
            PayBridgeError::Wallet { code, .. } => code
                .parse::<u16>()
                .ok()
                .and_then(|c| StatusCode::from_u16(c).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        } else {
            tracing::debug!("request rejected: {}", self.0);
        }

        let body = ClientError {
            id: uuid::Uuid::new_v4().to_string(),
            code: self.0.client_code().to_string(),
            title: self.0.title().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError(PayBridgeError::NotFound("channel abc123 not found".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError(PayBridgeError::Validation("paymentID must not be empty".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wallet_code_is_used_when_it_is_a_status() {
        let err = ApiError(PayBridgeError::Wallet {
            code: "409".into(),
            title: "conflict".into(),
            message: "already paid".into(),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = ApiError(PayBridgeError::Wallet {
            code: "N0002".into(),
            title: "oops".into(),
            message: "???".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeouts_and_protocol_violations_are_500s() {
        assert_eq!(
            ApiError(PayBridgeError::Timeout("abc123".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(PayBridgeError::UnexpectedKey("weird.route".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
