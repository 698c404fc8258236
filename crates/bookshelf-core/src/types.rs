//! Core data types for the bookshelf service.
//!
//! A [`Book`] is identified by its [`BookId`], assigned once at creation and
//! never reassigned. Title, author and publication year are mutable through
//! [`Book::apply`].

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Earliest accepted publication year.
pub const MIN_PUBLISHED_YEAR: i32 = 1900;

/// Latest accepted publication year: the current calendar year (UTC).
pub fn max_published_year() -> i32 {
    Utc::now().year()
}

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a book.
///
/// Wraps a UUID v4, providing type safety to distinguish book IDs from other
/// UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Creates a new random BookId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BookId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for BookId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

// ============================================================================
// Book
// ============================================================================

/// A book record as held by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

impl Book {
    /// Creates a book with a freshly generated id.
    pub fn new(title: impl Into<String>, author: impl Into<String>, published_year: i32) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            author: author.into(),
            published_year,
        }
    }

    /// Whether this book has exactly the given title and author.
    pub fn same_work(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }

    /// Overwrites the mutable fields. The id is left untouched.
    pub fn apply(&mut self, changes: BookChanges) {
        self.title = changes.title;
        self.author = changes.author;
        self.published_year = changes.published_year;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book(id={}, title={}, author={}, publishedYear={})",
            self.id, self.title, self.author, self.published_year
        )
    }
}

/// The mutable fields of a book, as supplied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_id_display_fromstr() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn book_id_serializes_as_bare_uuid() {
        let id = BookId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn new_books_get_distinct_ids() {
        let a = Book::new("T", "A", 2020);
        let b = Book::new("T", "A", 2020);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_keeps_id() {
        let mut book = Book::new("Old", "Someone", 1999);
        let id = book.id;
        book.apply(BookChanges {
            title: "New".to_string(),
            author: "Else".to_string(),
            published_year: 2001,
        });
        assert_eq!(book.id, id);
        assert_eq!(book.title, "New");
        assert_eq!(book.author, "Else");
        assert_eq!(book.published_year, 2001);
    }

    #[test]
    fn same_work_is_exact() {
        let book = Book::new("Dune", "Frank Herbert", 1965);
        assert!(book.same_work("Dune", "Frank Herbert"));
        assert!(!book.same_work("dune", "Frank Herbert"));
        assert!(!book.same_work("Dune", "F. Herbert"));
    }

    #[test]
    fn max_year_is_not_before_min() {
        assert!(max_published_year() >= MIN_PUBLISHED_YEAR);
    }
}
