//! Book model and the submitted book form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

/// Display order for field errors
const FIELD_ORDER: [&str; 4] = ["title", "author", "genre", "year"];

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn genre_or_blank(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }

    pub fn year_or_blank(&self) -> String {
        self.year.map(|year| year.to_string()).unwrap_or_default()
    }
}

/// Book fields as submitted by the new/edit forms.
///
/// Values are kept as raw text so a rejected submission can be shown back
/// to the user exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a value for \"Title\""))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a value for \"Author\""))]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre_or_blank().to_string(),
            year: book.year_or_blank(),
        }
    }
}

/// Validated column values ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl BookForm {
    /// Trim the submitted values and check them against the book schema.
    ///
    /// Fails with [`AppError::Validation`] listing every offending field.
    pub fn validate_changes(&self) -> AppResult<BookChanges> {
        let trimmed = Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year: self.year.trim().to_string(),
        };

        let mut errors = match trimmed.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        let year = if trimmed.year.is_empty() {
            None
        } else {
            match trimmed.year.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.push(FieldError {
                        field: "year".to_string(),
                        message: "\"Year\" must be a whole number".to_string(),
                    });
                    None
                }
            }
        };

        if !errors.is_empty() {
            errors.sort_by_key(|e| field_rank(&e.field));
            return Err(AppError::Validation(errors));
        }

        Ok(BookChanges {
            title: trimmed.title,
            author: trimmed.author,
            genre: Some(trimmed.genre).filter(|g| !g.is_empty()),
            year,
        })
    }
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{}\" is invalid", field)),
            })
        })
        .collect()
}

/// Filter accepted by [`crate::repository::BookStore::find_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    /// Substring of title, author or genre, or exact year
    Matching(String),
}

impl BookFilter {
    /// The search term interpreted as a year, if it is one
    pub fn year(term: &str) -> Option<i32> {
        term.trim().parse().ok()
    }

    /// Whether `book` satisfies the filter
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Matching(term) => {
                book.title.contains(term.as_str())
                    || book.author.contains(term.as_str())
                    || book
                        .genre
                        .as_deref()
                        .is_some_and(|g| g.contains(term.as_str()))
                    || (Self::year(term).is_some() && book.year == Self::year(term))
            }
        }
    }
}

/// Search form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default, rename = "searchValue")]
    pub search_value: String,
}
