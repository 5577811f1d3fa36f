use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Terminal request failures. None are retried server-side; the
/// client may resubmit manually.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Spam rejected")]
    SpamRejected,
    #[error("Validation failed")]
    ValidationFailed(Vec<String>),
    #[error("Captcha verification failed")]
    CaptchaFailed,
    #[error("Delivery failed")]
    DeliveryFailed,
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MethodNotAllowed => {
                tracing::debug!("Method not allowed");
                (StatusCode::METHOD_NOT_ALLOWED, json!({ "message": "Method Not Allowed" }))
            }
            Self::MalformedRequest(msg) => {
                tracing::debug!(message = %msg, "Malformed request");
                (StatusCode::BAD_REQUEST, json!({ "message": "Invalid request body" }))
            }
            // Deliberately generic: does not reveal which signal tripped.
            Self::SpamRejected => {
                tracing::info!("Submission rejected as spam");
                (StatusCode::BAD_REQUEST, json!({ "message": "Spam detected" }))
            }
            Self::ValidationFailed(errors) => {
                tracing::debug!(?errors, "Validation failed");
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            Self::CaptchaFailed => {
                tracing::info!("Captcha verification failed");
                (StatusCode::BAD_REQUEST, json!({ "message": "Captcha failed" }))
            }
            // Generic on the wire; provider detail stays in the server log.
            Self::DeliveryFailed => {
                tracing::error!("Email delivery failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Unable to send email at this time." }))
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Internal server error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
