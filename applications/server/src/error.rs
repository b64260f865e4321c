/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kikoeru_core::KikoeruError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request could not be extracted (path segments, JSON body)
    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Media(#[from] KikoeruError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Rejected { status, message } => (status, message),
            ServerError::Media(err) => media_status(err),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

fn media_status(err: KikoeruError) -> (StatusCode, String) {
    match err {
        KikoeruError::WorkNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        // Stale configuration vs. indexed data, the operator needs the folder name
        KikoeruError::ConfigurationMismatch { .. } => {
            tracing::error!("{}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        KikoeruError::TrackIndexOutOfRange { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        KikoeruError::FileNotFound(ref path) => {
            tracing::warn!("File missing at delivery time: {}", path.display());
            (StatusCode::NOT_FOUND, "File not found".to_string())
        }
        KikoeruError::Storage(ref msg) => {
            tracing::error!("Storage error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
        KikoeruError::Io(ref e) => {
            tracing::error!("IO error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
