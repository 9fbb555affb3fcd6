use super::payload::{CreateBook, UpdateBook};
use crate::db::Book;
use crate::error::{ApiMessage, LibrisError};
use crate::server::router::LibrisState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};

// Bodies are parsed from raw bytes instead of the `Json` extractor: this API
// reads the body as JSON no matter what `Content-Type` the client declared.

/// GET /api/books
pub async fn list_books(State(state): State<LibrisState>) -> Result<Json<Vec<Book>>, LibrisError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<LibrisState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Book>, LibrisError> {
    let Path(id) = path.map_err(|_| LibrisError::InvalidId)?;
    let book = state.store.get(id).await?.ok_or(LibrisError::BookNotFound)?;
    Ok(Json(book))
}

/// POST /api/books
///
/// Presence of `title` and `author` is the only validation this API performs;
/// an unreadable body fails the same presence check.
pub async fn create_book(
    State(state): State<LibrisState>,
    body: Bytes,
) -> Result<impl IntoResponse, LibrisError> {
    let req: CreateBook =
        serde_json::from_slice(&body).map_err(|_| LibrisError::IncompleteData)?;
    let book = state.store.create(&req.title, &req.author).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/books/{id}
///
/// Fields absent from the body keep their stored value; an unreadable body is
/// an empty patch.
pub async fn update_book(
    State(state): State<LibrisState>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Book>, LibrisError> {
    let Path(id) = path.map_err(|_| LibrisError::InvalidId)?;
    let patch: UpdateBook = serde_json::from_slice(&body).unwrap_or_default();
    let book = state
        .store
        .update(id, patch.title.as_deref(), patch.author.as_deref())
        .await?
        .ok_or(LibrisError::BookNotFound)?;
    Ok(Json(book))
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(state): State<LibrisState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiMessage>, LibrisError> {
    let Path(id) = path.map_err(|_| LibrisError::InvalidId)?;
    if state.store.delete(id).await? {
        Ok(Json(ApiMessage::new("Book deleted")))
    } else {
        Err(LibrisError::BookNotFound)
    }
}

/// PUT/DELETE on the bare collection path: the id segment is mandatory.
pub async fn missing_book_id() -> LibrisError {
    LibrisError::MissingId
}

/// Any other method on a books route.
pub async fn method_not_allowed() -> (StatusCode, Json<ApiMessage>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiMessage::new("Method not allowed")),
    )
}
