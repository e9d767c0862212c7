pub mod authors;
pub mod books;
pub mod health;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::domain::{DomainError, PageRequest};
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/:id",
            get(authors::get_author)
                .patch(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state)
}

/// Error envelope shared by all handlers
pub(crate) fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "message": message })))
}

/// Map a domain error to its client-facing response
pub(crate) fn error_response(err: DomainError) -> (StatusCode, Json<Value>) {
    match err {
        DomainError::NotFound => failure(StatusCode::NOT_FOUND, "Resource not found"),
        DomainError::Validation(msg) => failure(StatusCode::BAD_REQUEST, &msg),
        DomainError::AuthorNotFound => failure(StatusCode::NOT_FOUND, "Author not found"),
        DomainError::DuplicateIsbn => failure(
            StatusCode::BAD_REQUEST,
            "A book with this ISBN already exists",
        ),
        DomainError::Database(msg) => {
            tracing::error!("database error: {}", msg);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Ids use the backend's integer encoding; anything else is rejected
/// before a lookup is attempted.
pub(crate) fn parse_id(raw: &str) -> Result<i32, (StatusCode, Json<Value>)> {
    raw.parse::<i32>()
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Invalid ID"))
}

/// Validated page/limit pair; defaults are page=1, limit=10
pub(crate) fn page_request(
    page: Option<u64>,
    limit: Option<u64>,
) -> Result<PageRequest, (StatusCode, Json<Value>)> {
    let page = page.unwrap_or(1);
    let limit = limit.unwrap_or(10);
    if page < 1 {
        return Err(failure(StatusCode::BAD_REQUEST, "page must be >= 1"));
    }
    if limit < 1 {
        return Err(failure(StatusCode::BAD_REQUEST, "limit must be >= 1"));
    }
    Ok(PageRequest { page, limit })
}
