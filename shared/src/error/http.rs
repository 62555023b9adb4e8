//! HTTP status code mapping and axum response conversion

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::ProductNotFound | Self::CartNotFound => {
                StatusCode::NOT_FOUND
            }

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired => StatusCode::FORBIDDEN,

            // 409 Conflict (state or resource conflicts, client can reconcile)
            Self::AlreadyExists | Self::InvalidTransition | Self::InsufficientStock => {
                StatusCode::CONFLICT
            }

            // 502 / 504 (upstream payment provider failures)
            Self::GatewayError | Self::PaymentFailed => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,

            // 503 Service Unavailable (transient, client can retry)
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();

        // 5xx: log the internal detail, respond with the generic code message.
        // Internal error text must never reach the client.
        let message = if status.is_server_error() {
            tracing::error!(
                target: "app_error",
                code = %self.code,
                error = %self.message,
                "Internal error occurred"
            );
            self.code.message().to_string()
        } else {
            self.message
        };

        let body = Json(ApiResponse::<()>::error(message));
        (status, body).into_response()
    }
}
