//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookForm},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// Escape `LIKE` wildcards so the term is matched literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let books = match filter {
            BookFilter::All => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::Matching(term) => {
                sqlx::query_as::<_, Book>(&format!(
                    r#"
                    SELECT {BOOK_COLUMNS} FROM books
                    WHERE title LIKE $1 ESCAPE '\'
                       OR author LIKE $1 ESCAPE '\'
                       OR genre LIKE $1 ESCAPE '\'
                       OR year = $2
                    ORDER BY id
                    "#
                ))
                .bind(like_pattern(term))
                .bind(BookFilter::year(term))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(books)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let changes = form.validate_changes()?;

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.genre)
        .bind(changes.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let changes = form.validate_changes()?;

        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.genre)
        .bind(changes.year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
