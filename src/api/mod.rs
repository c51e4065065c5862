//! HTTP handlers and routing for the bookshelf pages

pub mod books;
pub mod health;
pub mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::AppState;

use views::{HtmlTemplate, NotFoundPage};

/// Directory served under `/static`
pub const PUBLIC_DIR: &str = "public";

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(books::index))
        .route("/books", get(books::list_books))
        .route("/books/new", get(books::new_book_form).post(books::create_book))
        .route("/books/:id", get(books::edit_book).post(books::update_book))
        .route("/books/:id/delete", post(books::delete_book))
        .route("/search", post(books::search_books))
        .route("/health", get(health::health_check))
        .nest_service("/static", ServeDir::new(PUBLIC_DIR))
        .fallback(page_not_found)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn page_not_found() -> Response {
    HtmlTemplate::new(NotFoundPage::default())
        .with_status(StatusCode::NOT_FOUND)
        .into_response()
}
