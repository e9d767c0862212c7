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
use crate::models::author::{CreateAuthorRequest, UpdateAuthorRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListAuthorsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/authors",
    responses(
        (status = 200, description = "Paginated list of authors"),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    params: Result<Query<ListAuthorsQuery>, QueryRejection>,
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

    match state.authors.find_all(page, params.search).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Authors found successfully",
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
    path = "/authors",
    responses(
        (status = 201, description = "Author created"),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> impl IntoResponse {
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

    match state.authors.create(input).await {
        Ok(author) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Author created successfully",
                "data": author,
            })),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    responses(
        (status = 200, description = "Author found"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.authors.find_by_id(id).await {
        Ok(Some(author)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Author found successfully",
                "data": author,
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Author not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/authors/{id}",
    responses(
        (status = 200, description = "Author updated"),
        (status = 400, description = "Invalid ID or validation failure"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAuthorRequest>, JsonRejection>,
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

    match state.authors.update(id, patch).await {
        Ok(Some(author)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Author updated successfully",
                "data": author,
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Author not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    responses(
        (status = 200, description = "Author deleted"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };

    match state.authors.delete(id).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Author deleted successfully",
            })),
        )
            .into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Author not found").into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
