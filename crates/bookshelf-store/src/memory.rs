//! In-memory book repository.
//!
//! Books live in a map keyed by insertion sequence so that iteration follows
//! insertion order, with a side index from id to sequence for keyed access.
//! Overwriting an existing id keeps the book at its original position.
//! All state sits behind a single `RwLock`, so each operation is atomic on
//! its own; sequences of calls are not.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bookshelf_core::{Book, BookId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repository::BookRepository;

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    index: HashMap<BookId, u64>,
    books: BTreeMap<u64, Book>,
}

impl Inner {
    fn get(&self, id: BookId) -> Option<&Book> {
        self.index.get(&id).and_then(|seq| self.books.get(seq))
    }

    fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        let seq = *self.index.get(&id)?;
        self.books.get_mut(&seq)
    }
}

/// Insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_offset(page: u64, size: u64) -> usize {
    usize::try_from(page.saturating_mul(size)).unwrap_or(usize::MAX)
}

fn page_limit(size: u64) -> usize {
    usize::try_from(size).unwrap_or(usize::MAX)
}

#[async_trait]
impl BookRepository for MemoryBookStore {
    async fn save(&self, book: Book) -> StoreResult<Book> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.get_mut(book.id) {
            *existing = book.clone();
            return Ok(book);
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.index.insert(book.id, seq);
        inner.books.insert(seq, book.clone());

        tracing::trace!(book_id = %book.id, seq, "Inserted book into memory store");
        Ok(book)
    }

    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().cloned().collect())
    }

    async fn find_page(&self, page: u64, size: u64) -> StoreResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner
            .books
            .values()
            .skip(page_offset(page, size))
            .take(page_limit(size))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.get(id).cloned())
    }

    async fn delete_by_id(&self, id: BookId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let seq = inner
            .index
            .remove(&id)
            .ok_or(StoreError::BookNotFound(id.0))?;
        inner.books.remove(&seq);
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.books.len() as u64)
    }

    async fn update(&self, book: &Book) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        match inner.get_mut(book.id) {
            Some(existing) => {
                existing.title.clone_from(&book.title);
                existing.author.clone_from(&book.author);
                existing.published_year = book.published_year;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_by_author_and_year_range(
        &self,
        author: &str,
        start_year: i32,
        end_year: i32,
    ) -> StoreResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner
            .books
            .values()
            .filter(|b| b.author == author && (start_year..=end_year).contains(&b.published_year))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
