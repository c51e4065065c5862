//! Repository layer for book storage

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookFilter, BookForm},
};

pub use books::BooksRepository;
pub use memory::MemoryBooksRepository;

/// Data access for the `books` table.
///
/// `create` and `update` validate the submitted form and fail with
/// `AppError::Validation` before anything is written. `update` and `destroy`
/// fail with `AppError::NotFound` when no row has the given id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Books matching `filter`, in insertion order
    async fn find_all(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, form: &BookForm) -> AppResult<Book>;

    /// Replace every editable field of book `id`
    async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book>;

    async fn destroy(&self, id: i32) -> AppResult<()>;
}
