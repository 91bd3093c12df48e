use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BookshelfError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Book metadata missing `{0}`")]
    MetadataParse(&'static str),

    #[error("Login required")]
    Unauthorized,
}

impl BookshelfError {
    /// True when the error came from the `UNIQUE(isbn13)` constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            BookshelfError::DatabaseError(SqlxError::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

impl IntoResponse for BookshelfError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            BookshelfError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "You must be logged in to do that.",
            ),
            BookshelfError::MetadataParse(_) | BookshelfError::Json(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_METADATA",
                "Error parsing book information. Please search again.",
            ),
            BookshelfError::Reqwest(_) | BookshelfError::UpstreamStatus(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "Upstream service is unavailable.",
            ),
            BookshelfError::DatabaseError(_)
            | BookshelfError::Config(_)
            | BookshelfError::InvalidConfig(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.",
            ),
        };
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
