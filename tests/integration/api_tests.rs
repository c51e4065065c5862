//! Page-level tests driving the router against the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use bookshelf_server::{
    api, config::AppConfig, repository::MemoryBooksRepository, services::Services, AppState,
};

fn app() -> Router {
    api::router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Arc::new(MemoryBooksRepository::new()))),
    })
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Create a book and return the path of its page
async fn create(app: &Router, body: &str) -> String {
    let response = post_form(app, "/books/new", body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response).to_string()
}

#[tokio::test]
async fn test_root_redirects_to_books() {
    let response = get(&app(), "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/books");
}

#[tokio::test]
async fn test_empty_catalog() {
    let response = get(&app(), "/books").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No books found"));
    assert!(!html.contains(r#"class="page""#));
}

#[tokio::test]
async fn test_new_book_form() {
    let response = get(&app(), "/books/new").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>New Book</title>"));
    assert!(!html.contains("validation-errors"));
}

#[tokio::test]
async fn test_create_redirects_to_new_book() {
    let app = app();
    let path = create(&app, "title=A&author=B").await;
    assert_eq!(path, "/books/1");

    let html = body_text(get(&app, &path).await).await;
    assert!(html.contains("<title>A</title>"));
    assert!(html.contains(r#"value="B""#));
}

#[tokio::test]
async fn test_create_with_missing_title_shows_errors() {
    let app = app();
    let response = post_form(&app, "/books/new", "title=&author=Kept+Author").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("validation-errors"));
    assert!(html.contains("Please provide a value for"));
    assert!(html.contains(r#"value="Kept Author""#));

    let listing = body_text(get(&app, "/books").await).await;
    assert!(listing.contains("No books found"));
}

#[tokio::test]
async fn test_create_with_bad_year_shows_errors() {
    let response = post_form(&app(), "/books/new", "title=A&author=B&year=soon").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("must be a whole number"));
    assert!(html.contains(r#"value="soon""#));
}

#[tokio::test]
async fn test_edit_missing_book_renders_error_view_with_404() {
    let response = get(&app(), "/books/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book Not Found"));
}

#[tokio::test]
async fn test_update_redirects_to_book() {
    let app = app();
    let path = create(&app, "title=Go&author=Bob&year=2000").await;

    let response = post_form(&app, &path, "title=Go+Again&author=Bob&genre=Tech&year=2001").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), path);

    let html = body_text(get(&app, &path).await).await;
    assert!(html.contains("<title>Go Again</title>"));
    assert!(html.contains(r#"value="Tech""#));
    assert!(html.contains(r#"value="2001""#));
}

#[tokio::test]
async fn test_update_with_blank_author_keeps_submission() {
    let app = app();
    let path = create(&app, "title=Go&author=Bob").await;

    let response = post_form(&app, &path, "title=Renamed&author=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>Edit Book</title>"));
    assert!(html.contains(r#"value="Renamed""#));
    assert!(html.contains(&format!(r#"action="{}""#, path)));

    let html = body_text(get(&app, &path).await).await;
    assert!(html.contains("<title>Go</title>"));
}

#[tokio::test]
async fn test_update_missing_book_renders_error_view_with_404() {
    let response = post_form(&app(), "/books/7", "title=A&author=B").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book Not Found"));
}

#[tokio::test]
async fn test_delete_redirects_to_list() {
    let app = app();
    let path = create(&app, "title=Go&author=Bob").await;

    let response = post_form(&app, &format!("{}/delete", path), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/books");

    assert_eq!(get(&app, &path).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_book_renders_error_view_with_404() {
    let response = post_form(&app(), "/books/3/delete", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book Not Found"));
}

#[tokio::test]
async fn test_search_by_title_substring() {
    let app = app();
    create(&app, "title=The+Hobbit&author=Tolkien").await;
    create(&app, "title=Emma&author=Austen").await;

    let html = body_text(post_form(&app, "/search", "searchValue=Hob").await).await;
    assert!(html.contains(">The Hobbit</a>"));
    assert!(!html.contains(">Emma</a>"));
    assert!(html.contains(r#"value="Hob""#));
}

#[tokio::test]
async fn test_search_by_year_is_exact() {
    let app = app();
    create(&app, "title=Ninety&author=A&year=1990").await;
    create(&app, "title=Later&author=B&year=19901").await;
    create(&app, "title=Undated+1990s&author=C").await;

    let html = body_text(post_form(&app, "/search", "searchValue=1990").await).await;
    assert!(html.contains(">Ninety</a>"));
    assert!(!html.contains(">Later</a>"));
    // title substring still matches
    assert!(html.contains(">Undated 1990s</a>"));
}

#[tokio::test]
async fn test_empty_search_returns_everything() {
    let app = app();
    create(&app, "title=Go&author=Bob").await;
    create(&app, "title=Rust&author=Amy&genre=Programming").await;

    let html = body_text(post_form(&app, "/search", "searchValue=").await).await;
    assert!(html.contains(">Go</a>"));
    assert!(html.contains(">Rust</a>"));
}

#[tokio::test]
async fn test_listing_splits_into_pages_of_ten() {
    let app = app();
    for n in 1..=11 {
        create(&app, &format!("title=Book+{}&author=Writer", n)).await;
    }

    let html = body_text(get(&app, "/books").await).await;
    assert_eq!(html.matches(r#"class="page""#).count(), 2);
    assert!(html.contains(r#"id="page-2""#));
    assert!(html.contains(">Book 11</a>"));
}

#[tokio::test]
async fn test_seeded_catalog_scenario() {
    let app = app();
    create(&app, "title=Go&author=Bob&year=2000").await;
    create(&app, "title=Rust&author=Amy&year=2015").await;

    let html = body_text(get(&app, "/books").await).await;
    assert_eq!(html.matches(r#"class="page""#).count(), 1);
    let go = html.find(">Go</a>").unwrap();
    let rust = html.find(">Rust</a>").unwrap();
    assert!(go < rust);

    let html = body_text(post_form(&app, "/search", "searchValue=2000").await).await;
    assert!(html.contains(">Go</a>"));
    assert!(!html.contains(">Rust</a>"));
    assert!(!html.contains("Amy"));
}

#[tokio::test]
async fn test_health() {
    let response = get(&app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("healthy"));
}
