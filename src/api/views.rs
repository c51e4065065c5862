//! Server-rendered pages

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    models::{Book, BookForm, FieldError},
    services::catalog::BookPages,
};

/// Wrapper rendering an askama template as an HTML response
pub struct HtmlTemplate<T: Template> {
    template: T,
    status: StatusCode,
}

impl<T: Template> HtmlTemplate<T> {
    pub fn new(template: T) -> Self {
        Self {
            template,
            status: StatusCode::OK,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("Template rendering error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!("<!-- Template error: {} -->", err)),
                )
                    .into_response()
            }
        }
    }
}

/// `all_books` view: every page of a listing or search
#[derive(Template)]
#[template(path = "all_books.html")]
pub struct AllBooksPage {
    pub pages: Vec<Vec<Book>>,
    pub search_value: String,
}

impl From<BookPages> for AllBooksPage {
    fn from(listing: BookPages) -> Self {
        Self {
            pages: listing.pages,
            search_value: listing.search_value,
        }
    }
}

/// `new_book` form
#[derive(Template)]
#[template(path = "new_book.html")]
pub struct NewBookPage {
    pub title: String,
    pub book: BookForm,
    pub errors: Vec<FieldError>,
}

impl NewBookPage {
    pub fn empty() -> Self {
        Self::with_errors(BookForm::default(), Vec::new())
    }

    pub fn with_errors(book: BookForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: "New Book".to_string(),
            book,
            errors,
        }
    }
}

/// `edit` form for an existing book
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditBookPage {
    pub title: String,
    pub id: i32,
    pub book: BookForm,
    pub errors: Vec<FieldError>,
}

impl EditBookPage {
    pub fn for_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            id: book.id,
            book: BookForm::from(book),
            errors: Vec::new(),
        }
    }

    /// Re-show a rejected submission for book `id`
    pub fn with_errors(id: i32, book: BookForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: "Edit Book".to_string(),
            id,
            book,
            errors,
        }
    }
}

/// Generic error view, used for unknown books
#[derive(Template, Default)]
#[template(path = "error.html")]
pub struct ErrorPage {}

/// Fallback for unknown routes
#[derive(Template, Default)]
#[template(path = "page_not_found.html")]
pub struct NotFoundPage {}

/// The error view with a 404 status
pub fn book_not_found() -> Response {
    HtmlTemplate::new(ErrorPage::default())
        .with_status(StatusCode::NOT_FOUND)
        .into_response()
}
