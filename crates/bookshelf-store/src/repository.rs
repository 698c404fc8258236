//! The storage capability the service layer is written against.
//!
//! Both [`MemoryBookStore`](crate::MemoryBookStore) and
//! [`PgBookStore`](crate::PgBookStore) implement [`BookRepository`]; the
//! server picks one at startup and only ever sees `Arc<dyn BookRepository>`.

use async_trait::async_trait;
use bookshelf_core::{Book, BookId};

use crate::error::StoreResult;

/// Persistence operations over [`Book`] records.
///
/// Ordering: `find_all`, `find_page` and `find_by_author_and_year_range`
/// return books in insertion order.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert the book, or overwrite the record with the same id.
    async fn save(&self, book: Book) -> StoreResult<Book>;

    /// All books, unbounded.
    async fn find_all(&self) -> StoreResult<Vec<Book>>;

    /// Skip `page * size` books, then take at most `size`.
    async fn find_page(&self, page: u64, size: u64) -> StoreResult<Vec<Book>>;

    /// Look up a single book.
    async fn find_by_id(&self, id: BookId) -> StoreResult<Option<Book>>;

    /// Remove a book.
    ///
    /// Fails with [`StoreError::BookNotFound`](crate::StoreError::BookNotFound)
    /// when no book has this id.
    async fn delete_by_id(&self, id: BookId) -> StoreResult<()>;

    /// Total number of stored books.
    async fn count(&self) -> StoreResult<u64>;

    /// Overwrite title, author and year of the book with `book.id`.
    ///
    /// Returns the number of rows affected: 1 on success, 0 if absent.
    async fn update(&self, book: &Book) -> StoreResult<u64>;

    /// Books by `author` published within `[start_year, end_year]`.
    async fn find_by_author_and_year_range(
        &self,
        author: &str,
        start_year: i32,
        end_year: i32,
    ) -> StoreResult<Vec<Book>>;
}
