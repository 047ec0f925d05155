use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found")
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request")
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            ApplicationError::Forbidden => {
                warn!("Forbidden file operation");
                (StatusCode::FORBIDDEN, "Forbidden")
            }
            ApplicationError::PayloadTooLarge => {
                warn!("File too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "File too large")
            }
            ApplicationError::OtpDelivery(ref msg) => {
                error!("OTP delivery failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send an OTP")
            }
            ApplicationError::InvalidOtp => {
                warn!("Invalid or expired OTP");
                (StatusCode::UNAUTHORIZED, "Failed to verify OTP")
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
