use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use librarium::db;
use librarium::server::build_router;
use librarium::state::AppState;

async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    build_router(AppState::new(db), &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response should be JSON")
    };
    (status, body)
}

async fn create_author(app: &Router, first: &str, last: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/authors",
        Some(json!({ "firstName": first, "lastName": last })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().expect("Author id")
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_author_crud_flow() {
    let app = setup_app().await;

    // Create
    let (status, body) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "firstName": "Test", "lastName": "Author" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Author created successfully");
    assert_eq!(body["data"]["firstName"], "Test");
    let id = body["data"]["id"].as_i64().expect("Author id");

    // Appears in the listing
    let (status, body) = send(&app, "GET", "/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["data"][0]["id"].as_i64(), Some(id));

    // Fetch by id
    let (status, body) = send(&app, "GET", &format!("/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lastName"], "Author");

    // Patch the first name only
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/authors/{}", id),
        Some(json!({ "firstName": "Updated Test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstName"], "Updated Test");
    assert_eq!(body["data"]["lastName"], "Author");

    // Delete, then the id is gone
    let (status, body) = send(&app, "DELETE", &format!("/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, "GET", &format!("/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Author not found");
}

#[tokio::test]
async fn test_create_author_missing_fields() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "firstName": "Solo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "lastName is required");
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_lookup() {
    let app = setup_app().await;

    for uri in ["/authors/abc", "/books/not-a-number"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid ID");
    }
}

#[tokio::test]
async fn test_unknown_ids_return_not_found() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/authors/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/books/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_create_book_and_reject_duplicate_isbn() {
    let app = setup_app().await;
    let author_id = create_author(&app, "Jane", "Writer").await;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "First Novel",
            "isbn": "123-0-00-000000-0",
            "authorId": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Book created successfully");
    assert_eq!(body["data"]["authorId"].as_i64(), Some(author_id));
    assert_eq!(body["data"]["isbn"], "123-0-00-000000-0");

    // Same ISBN again fails and persists nothing
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Second Novel",
            "isbn": "123-0-00-000000-0",
            "authorId": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "A book with this ISBN already exists");

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_create_book_for_missing_author() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Orphan",
            "isbn": "123-0-00-000000-0",
            "authorId": 9999,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Author not found");

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_create_book_validation_failures() {
    let app = setup_app().await;
    let author_id = create_author(&app, "Jane", "Writer").await;

    // Malformed ISBN
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Bad ISBN",
            "isbn": "not-an-isbn",
            "authorId": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ISBN format: not-an-isbn");

    // Unknown genre
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Bad Genre",
            "isbn": "123-0-00-000000-0",
            "genre": "Romance",
            "authorId": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown genre: Romance");

    // Missing title
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "isbn": "123-0-00-000000-0",
            "authorId": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "title is required");
}

#[tokio::test]
async fn test_body_type_mismatch_keeps_error_envelope() {
    let app = setup_app().await;

    // A non-integer authorId fails deserialization, not validation; the
    // response still carries the {success, message} envelope
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Typed Wrong",
            "isbn": "123-0-00-000000-0",
            "authorId": "not-a-number",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("authorId"));

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_query_string_type_mismatch_keeps_error_envelope() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/books?limit=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    // page is unsigned, so a negative value is a deserialization failure
    let (status, body) = send(&app, "GET", "/authors?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let app = setup_app().await;
    let author_id = create_author(&app, "Frank", "Herbert").await;
    let other_id = create_author(&app, "John", "Tolkien").await;

    send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Dune",
            "isbn": "978-0-44-117271-9",
            "genre": "Science Fiction",
            "authorId": author_id,
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "The Hobbit",
            "isbn": "978-0-26-110221-7",
            "genre": "Fantasy",
            "authorId": other_id,
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/books?genre=Fantasy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "The Hobbit");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/books?authorId={}", author_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "Dune");

    let (status, body) = send(&app, "GET", "/books?search=dune", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, body) = send(&app, "GET", "/books?genre=Romance", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown genre: Romance");
}

#[tokio::test]
async fn test_update_book_returns_not_found_and_applies_patch() {
    let app = setup_app().await;
    let author_id = create_author(&app, "Jane", "Writer").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/books/9999",
        Some(json!({ "title": "No Such Book" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");

    let (_, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Draft",
            "isbn": "123-0-00-000000-0",
            "authorId": author_id,
        })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/books/{}", id),
        Some(json!({ "title": "Final Title" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Final Title");
    assert_eq!(body["data"]["isbn"], "123-0-00-000000-0");
}

#[tokio::test]
async fn test_delete_book_returns_deleted_record() {
    let app = setup_app().await;
    let author_id = create_author(&app, "Jane", "Writer").await;

    let (_, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Ephemeral",
            "isbn": "123-0-00-000000-0",
            "authorId": author_id,
        })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Ephemeral");

    let (status, _) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination_bounds() {
    let app = setup_app().await;
    create_author(&app, "Only", "One").await;

    let (status, body) = send(&app, "GET", "/authors?page=5&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, "GET", "/authors?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "limit must be >= 1");
}
