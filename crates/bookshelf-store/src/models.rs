//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They are kept separate from the domain types in
//! bookshelf-core so that bookkeeping columns stay out of the domain.

use bookshelf_core::{Book, BookId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: Uuid,
    /// Insertion sequence, used for ordering.
    pub seq: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub created: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId::from_uuid(row.id),
            title: row.title,
            author: row.author,
            published_year: row.published_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_book_drops_bookkeeping() {
        let id = Uuid::new_v4();
        let row = BookRow {
            id,
            seq: 7,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: 1965,
            created: Utc::now(),
        };
        let book = Book::from(row);
        assert_eq!(book.id, BookId::from_uuid(id));
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.published_year, 1965);
    }
}
