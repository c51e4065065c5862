//! Book catalog pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::{AppError, AppResult},
    models::{BookForm, SearchForm},
    AppState,
};

use super::views::{book_not_found, AllBooksPage, EditBookPage, HtmlTemplate, NewBookPage};

/// GET / redirects to the book list
pub async fn index() -> Redirect {
    Redirect::to("/books")
}

/// List every book, ten per page
pub async fn list_books(State(state): State<AppState>) -> AppResult<Response> {
    let listing = state.services.catalog.list().await?;
    Ok(HtmlTemplate::new(AllBooksPage::from(listing)).into_response())
}

/// Empty new-book form
pub async fn new_book_form() -> Response {
    HtmlTemplate::new(NewBookPage::empty()).into_response()
}

/// Create a book, or re-show the form with the validation errors
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create(&form).await {
        Ok(book) => Ok(Redirect::to(&format!("/books/{}", book.id)).into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(HtmlTemplate::new(NewBookPage::with_errors(form, errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Edit form for an existing book
pub async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(book) = state.services.catalog.find(&id).await? else {
        return Ok(book_not_found());
    };
    Ok(HtmlTemplate::new(EditBookPage::for_book(&book)).into_response())
}

/// Replace a book's fields, or re-show the edit form with the validation errors
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let Some(book) = state.services.catalog.find(&id).await? else {
        return Ok(book_not_found());
    };

    match state.services.catalog.update(book.id, &form).await {
        Ok(book) => Ok(Redirect::to(&format!("/books/{}", book.id)).into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(HtmlTemplate::new(EditBookPage::with_errors(book.id, form, errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(book) = state.services.catalog.find(&id).await? else {
        return Ok(book_not_found());
    };
    state.services.catalog.delete(book.id).await?;
    Ok(Redirect::to("/books").into_response())
}

/// Search titles, authors and genres by substring and years exactly
pub async fn search_books(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> AppResult<Response> {
    let listing = state.services.catalog.search(&search.search_value).await?;
    Ok(HtmlTemplate::new(AllBooksPage::from(listing)).into_response())
}
