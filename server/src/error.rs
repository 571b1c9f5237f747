use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Speech error: {0}")]
    SpeechError(#[from] anyhow::Error),

    #[error("Upstream audio error: {0}")]
    UpstreamAudio(#[from] audio_core::DecodeError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::SpeechError(e) => {
                tracing::error!("Speech error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Speech error: {}", e),
                )
            }
            ApiError::UpstreamAudio(e) => {
                tracing::error!("Upstream returned malformed audio: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Upstream returned malformed audio: {}", e),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.clone(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
