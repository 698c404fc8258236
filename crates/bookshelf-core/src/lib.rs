//! bookshelf-core: domain types for the bookshelf service.
//!
//! This crate holds the storage-facing representation of a book and its
//! identifier. It has no knowledge of HTTP or of any particular backend;
//! the wire shape lives in `bookshelf-server` and the row shape in
//! `bookshelf-store`.

pub mod types;

pub use types::{Book, BookChanges, BookId, MIN_PUBLISHED_YEAR, max_published_year};
