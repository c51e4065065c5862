//! Data models for the bookshelf

pub mod book;

pub use book::{Book, BookChanges, BookFilter, BookForm, FieldError, SearchForm};
