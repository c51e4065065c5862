//! Catalog service: book lookups, writes and paginated listings

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookFilter, BookForm},
    repository::BookStore,
};

use super::pagination::paginate;

/// Paginated result of a listing or search
#[derive(Debug, Clone, Default)]
pub struct BookPages {
    pub pages: Vec<Vec<Book>>,
    /// The term the listing was filtered by, empty for the full list
    pub search_value: String,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Every book, split into pages
    pub async fn list(&self) -> AppResult<BookPages> {
        let books = self.store.find_all(&BookFilter::All).await?;
        Ok(BookPages {
            pages: paginate(books),
            search_value: String::new(),
        })
    }

    /// Books whose title, author or genre contain `term`, or whose year equals it
    pub async fn search(&self, term: &str) -> AppResult<BookPages> {
        let books = self
            .store
            .find_all(&BookFilter::Matching(term.to_string()))
            .await?;
        tracing::debug!(term, found = books.len(), "Book search");
        Ok(BookPages {
            pages: paginate(books),
            search_value: term.to_string(),
        })
    }

    /// Look up a book by its path id. Ids that are not integers match nothing.
    pub async fn find(&self, id: &str) -> AppResult<Option<Book>> {
        match id.parse::<i32>() {
            Ok(id) => self.store.find_by_id(id).await,
            Err(_) => Ok(None),
        }
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let book = self.store.create(form).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let book = self.store.update(id, form).await?;
        tracing::info!(book_id = book.id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.destroy(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
