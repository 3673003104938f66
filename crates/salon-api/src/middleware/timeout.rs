//! Request timeout handling.

use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::timeout::error::Elapsed;

use crate::error::ApiErrorResponse;

/// Turns errors from the `tower` timeout layer into JSON responses.
///
/// A timed-out handler future is dropped, which rolls back any open
/// barber-day transaction.
pub async fn handle_timeout_error(err: BoxError) -> Response {
    let (status, code, message) = if err.is::<Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", "Request timed out".to_string())
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "Internal server error".to_string(),
        )
    };

    (
        status,
        Json(ApiErrorResponse {
            error: code.to_string(),
            message,
        }),
    )
        .into_response()
}
