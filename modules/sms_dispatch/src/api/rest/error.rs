use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use crate::api::rest::dto::SmsResponse;
use crate::domain::error::DomainError;

/// Error half of every handler result.
pub type ErrorResponse = (StatusCode, Json<SmsResponse>);

pub fn from_parts(status: StatusCode, label: &str, message: impl Into<String>) -> ErrorResponse {
    (status, Json(SmsResponse::new(label, message)))
}

/// Map domain error to its HTTP status and body
pub fn map_domain_error(e: &DomainError) -> ErrorResponse {
    match e {
        DomainError::Validation { reason } => {
            from_parts(StatusCode::BAD_REQUEST, "FAILED", reason.to_string())
        }
        DomainError::Blocked { .. } => from_parts(StatusCode::FORBIDDEN, "BLOCKED", e.to_string()),
        DomainError::Store { .. } => {
            // details stay in the log
            tracing::error!(error = ?e, "Blocklist store error occurred");
            from_parts(StatusCode::INTERNAL_SERVER_ERROR, "FAILED", "Internal error")
        }
    }
}

/// Unparseable request bodies are client errors in the same envelope.
pub fn map_json_rejection(rejection: &JsonRejection) -> ErrorResponse {
    from_parts(StatusCode::BAD_REQUEST, "FAILED", rejection.body_text())
}
