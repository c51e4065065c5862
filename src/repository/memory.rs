//! In-memory book store, used when `database.url` is `memory://` and in tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookForm},
};

#[derive(Default)]
struct Shelf {
    last_id: i32,
    /// Kept sorted by id
    books: Vec<Book>,
}

#[derive(Default)]
pub struct MemoryBooksRepository {
    shelf: RwLock<Shelf>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBooksRepository {
    async fn find_all(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf
            .books
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|book| book.id == id).cloned())
    }

    async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let changes = form.validate_changes()?;
        let now = Utc::now();

        let mut shelf = self.shelf.write().await;
        shelf.last_id += 1;
        let book = Book {
            id: shelf.last_id,
            title: changes.title,
            author: changes.author,
            genre: changes.genre,
            year: changes.year,
            created_at: now,
            updated_at: now,
        };
        shelf.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let changes = form.validate_changes()?;

        let mut shelf = self.shelf.write().await;
        let book = shelf
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        book.title = changes.title;
        book.author = changes.author;
        book.genre = changes.genre;
        book.year = changes.year;
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        let mut shelf = self.shelf.write().await;
        let before = shelf.books.len();
        shelf.books.retain(|book| book.id != id);
        if shelf.books.len() == before {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
