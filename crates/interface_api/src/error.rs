//! API error handling
//!
//! Validation and invariant failures carry their message to the caller;
//! storage failures collapse to a generic "processing failed" response with
//! the underlying cause logged for operators only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use infra_db::{DatabaseError, StoreError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized".to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Maps a store error, collapsing opaque storage failures to the given
    /// caller-facing message
    pub fn from_store(err: StoreError, opaque_message: &str) -> Self {
        if err.is_opaque() {
            // Operators get the cause; the caller gets a retryable generic
            error!(cause = %err, "storage failure");
            return ApiError::Internal(opaque_message.to_string());
        }

        match err {
            StoreError::Database(DatabaseError::NotFound(msg)) => ApiError::NotFound(msg),
            StoreError::Database(DatabaseError::DuplicateEntry(msg)) => {
                ApiError::Validation(msg)
            }
            StoreError::Database(DatabaseError::HoldOverlap(_)) => ApiError::Conflict(
                "Bed is already held for an overlapping stay".to_string(),
            ),
            StoreError::Domain(e) if e.is_validation() => ApiError::Validation(e.to_string()),
            StoreError::Domain(e) => ApiError::Conflict(e.to_string()),
            StoreError::Lodging(e) => ApiError::Conflict(e.to_string()),
            StoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::from_store(err, "Processing failed. Please try again.")
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        error!(cause = %err, "database failure");
        ApiError::Internal("Processing failed. Please try again.".to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_reservation::ReservationError;

    #[test]
    fn test_opaque_store_errors_hide_cause() {
        let err: StoreError = DatabaseError::TransactionFailed("pg is down".into()).into();
        let api = ApiError::from_store(err, "Payment processing failed. Please try again.");

        match api {
            ApiError::Internal(msg) => {
                assert!(!msg.contains("pg is down"));
                assert!(msg.contains("Payment processing failed"));
            }
            _ => panic!("Expected Internal error"),
        }
    }

    #[test]
    fn test_validation_errors_surface_their_message() {
        let err: StoreError = ReservationError::NonPositiveAmount.into();
        let api = ApiError::from(err);

        match api {
            ApiError::Validation(msg) => assert!(msg.contains("zero or less")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_invariant_errors_are_conflicts() {
        let err: StoreError = ReservationError::AlreadyExempted.into();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_receipt_is_validation() {
        let err: StoreError =
            DatabaseError::duplicate("Payment", "or_number", "OR-1").into();
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }
}
