use crate::server::router::LibrisState;
use axum::{Router, routing::get};

pub mod handlers;
pub mod payload;

use handlers::{
    create_book, delete_book, get_book, list_books, method_not_allowed, missing_book_id,
    update_book,
};

pub fn router() -> Router<LibrisState> {
    Router::new()
        .route(
            "/api/books",
            get(list_books)
                .post(create_book)
                // An id-less PUT/DELETE is a validation error, not an
                // unknown method.
                .put(missing_book_id)
                .delete(missing_book_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/books/{id}",
            get(get_book)
                .put(update_book)
                .delete(delete_book)
                .fallback(method_not_allowed),
        )
}
