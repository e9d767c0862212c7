use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{error_response, failure, page_request, parse_id};
use crate::domain::BookQuery;
use crate::models::Genre;
use crate::models::book::{CreateBookRequest, UpdateBookRequest};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub genre: Option<String>,
    pub author_id: Option<i32>,
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Paginated list of books"),
        (status = 400, description = "Invalid pagination parameters or unknown genre")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    params: Result<Query<ListBooksQuery>, QueryRejection>,
) -> impl IntoResponse {
    // A malformed query string keeps the error envelope shape
    let Query(params) = match params {
        Ok(query) => query,
        Err(rejection) => {
            return failure(StatusCode::BAD_REQUEST, &rejection.body_text()).into_response();
        }
    };
    let page = match page_request(params.page, params.limit) {
        Ok(page) => page,
        Err(resp) => return resp.into_response(),
    };

    let genre = match params.genre.as_deref() {
        None | Some("") => None,
        Some(g) => match Genre::parse(g) {
            Some(genre) => Some(genre),
            None => {
                return failure(StatusCode::BAD_REQUEST, &format!("Unknown genre: {}", g))
                    .into_response();
            }
        },
    };

    let filter = BookQuery {
        genre,
        author_id: params.author_id,
        search: params.search,
    };

    match state.books.find_all(page, filter).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Books found successfully",
                "total": result.total,
                "page": result.page,
                "limit": result.limit,
                "data": result.data,
            })),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Validation failure or duplicate ISBN"),
        (status = 404, description = "Referenced author not found")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Body deserialization failures (e.g. a non-integer authorId) are
    // reported through the same envelope as validation failures
    let Json(payload) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return failure(StatusCode::BAD_REQUEST, &rejection.body_text()).into_response();
        }
    };
    let input = match payload.validate() {
        Ok(input) => input,
        Err(msg) => return failure(StatusCode::BAD_REQUEST, &msg).into_response(),
    };

    match state.books.create(input).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Book created successfully",
                "data": book,
            })),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    responses(
        (status = 200, description = "Book found"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.books.find_by_id(id).await {
        Ok(Some(book)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Book found successfully",
                "data": book,
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/books/{id}",
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid ID or validation failure"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };
    let Json(payload) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return failure(StatusCode::BAD_REQUEST, &rejection.body_text()).into_response();
        }
    };
    let patch = match payload.validate() {
        Ok(patch) => patch,
        Err(msg) => return failure(StatusCode::BAD_REQUEST, &msg).into_response(),
    };

    match state.books.update(id, patch).await {
        Ok(Some(book)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Book updated successfully",
                "data": book,
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.books.delete(id).await {
        Ok(Some(book)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Book deleted successfully",
                "data": book,
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
