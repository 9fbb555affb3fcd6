use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum LibrisError {
    #[error("book id is required")]
    MissingId,

    #[error("invalid book id")]
    InvalidId,

    #[error("title and author are required")]
    IncompleteData,

    #[error("book not found")]
    BookNotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for LibrisError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            LibrisError::MissingId => (StatusCode::BAD_REQUEST, "Book id is required"),
            LibrisError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid book id"),
            LibrisError::IncompleteData => {
                (StatusCode::BAD_REQUEST, "Title and author are required")
            }
            LibrisError::BookNotFound => (StatusCode::NOT_FOUND, "Book not found"),
            LibrisError::DatabaseError(e) => {
                // Keep the detail in the log; the client only sees a generic message.
                error!(error = %e, "database operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        };
        (status, Json(ApiMessage::new(message))).into_response()
    }
}

/// Every error and status payload of this API is a flat `{"message": …}` object.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
