//! Gateway error handling
//!
//! Maps ledger errors to HTTP statuses: missing users are 404, the
//! expected business rejections (duplicate receipt, insufficient balance)
//! are 400, and anything else is an opaque 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rewards_ledger::Error as LedgerError;
use thiserror::Error;

/// Error returned by gateway handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error surfaced by the ledger
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Gateway-internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Ledger(err @ LedgerError::UserNotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::Ledger(err @ LedgerError::DuplicateReceipt(_))
            | ApiError::Ledger(err @ LedgerError::InsufficientBalance { .. })
            | ApiError::Ledger(err @ LedgerError::BalanceOverflow { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Ledger(err) => {
                // Unexpected internal fault: log detail, keep the response opaque
                tracing::error!(error = %err, "Ledger operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Gateway failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": message,
                "timestamp": chrono::Utc::now(),
            })),
        )
            .into_response()
    }
}
