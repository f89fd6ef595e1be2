//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, TripError};

pub const TRIP_NOT_FOUND: &str = "Trip Not Found";
pub const PIECE_NOT_FOUND: &str = "Piece Not Found";
pub const STOP_NOT_FOUND: &str = "Stop not found";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl ApiError {
    pub fn trip_not_found() -> Self {
        ApiError::NotFound(TRIP_NOT_FOUND.to_string())
    }

    pub fn unknown_operation() -> Self {
        ApiError::BadRequest("unknown operation".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        metrics::counter!("api_requests_rejected_total", "status" => status.as_u16().to_string())
            .increment(1);
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Trip(trip_err @ TripError::InvalidTransition { .. }) => {
            (StatusCode::BAD_REQUEST, trip_err.to_string())
        }
        DomainError::TripNotFound { .. } => (StatusCode::NOT_FOUND, TRIP_NOT_FOUND.to_string()),
        DomainError::PieceNotFound { .. } => (StatusCode::NOT_FOUND, PIECE_NOT_FOUND.to_string()),
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}
