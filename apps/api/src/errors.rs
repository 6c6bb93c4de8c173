use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::resume::extract::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Multipart failures are client errors; a body over `limit` gets its own 413.
    pub fn from_multipart(e: MultipartError, limit: usize) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge { limit };
        }
        AppError::Validation(format!("Malformed form submission: {}", e.body_text()))
    }
}

/// `10485760` → "10 MB"; sizes that are not whole megabytes stay in bytes.
fn describe_limit(limit: usize) -> String {
    const MB: usize = 1024 * 1024;
    if limit >= MB && limit % MB == 0 {
        format!("{} MB", limit / MB)
    } else {
        format!("{limit} bytes")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!(
                    "The upload is larger than the {} limit. Please upload a smaller PDF.",
                    describe_limit(*limit)
                ),
            ),
            AppError::Pdf(e) => {
                tracing::warn!("PDF extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PDF_ERROR",
                    format!("Error extracting text from PDF: {e}. Please ensure it's a valid PDF file."),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
