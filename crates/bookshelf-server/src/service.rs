//! Book service: business rules between the HTTP layer and storage.
//!
//! - `create` rejects a second book with the same title and author
//! - `get_by_id` retries failed lookups before giving up
//! - `stream_all_books` paces a snapshot of all books for SSE delivery
//!
//! The service only sees `Arc<dyn BookRepository>`, so it behaves the same
//! over the in-memory and PostgreSQL stores.

use std::sync::Arc;
use std::time::Duration;

use bookshelf_core::{Book, BookId};
use bookshelf_store::{BookRepository, StoreError, StoreResult};
use futures::Stream;
use tokio::sync::Mutex;

use crate::dto::BookDto;
use crate::stream::paced;
use crate::validation::{Page, YearRange};

/// Additional lookup attempts made by `get_by_id` after a failed one.
pub const FETCH_RETRIES: usize = 3;

/// Errors produced by [`BookService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No book with this id.
    #[error("Book with id = [{0}] not found")]
    NotFound(BookId),

    /// A book with this title and author already exists.
    #[error("A book [{title}] by [{author}] already exists.")]
    Duplicate { title: String, author: String },

    /// Lookup kept failing after all retries.
    #[error("Error while fetching a book with id = {id}")]
    Fetch {
        id: BookId,
        #[source]
        source: StoreError,
    },

    /// Any other storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Orchestrates book operations over a [`BookRepository`].
#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    /// Serializes the duplicate check and the insert in `create`.
    create_lock: Arc<Mutex<()>>,
    stream_delay: Duration,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>, stream_delay: Duration) -> Self {
        Self {
            repository,
            create_lock: Arc::new(Mutex::new(())),
            stream_delay,
        }
    }

    /// Create a book from `dto` under a fresh id.
    ///
    /// Fails with [`ServiceError::Duplicate`] when a book with exactly the
    /// same title and author is already stored.
    pub async fn create(&self, dto: BookDto) -> ServiceResult<BookDto> {
        let book = dto.into_entity();

        let _guard = self.create_lock.lock().await;

        let existing = self.repository.find_all().await?;
        if existing.iter().any(|b| b.same_work(&book.title, &book.author)) {
            tracing::warn!(title = %book.title, author = %book.author, "Duplicate book rejected");
            return Err(ServiceError::Duplicate {
                title: book.title,
                author: book.author,
            });
        }

        let saved = self.repository.save(book).await?;

        tracing::info!(book_id = %saved.id, title = %saved.title, "Book created");
        Ok(saved.into())
    }

    /// One page of books in insertion order.
    pub async fn get_all(&self, page: Page) -> ServiceResult<Vec<BookDto>> {
        let books = self.repository.find_page(page.page, page.size).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    /// Fetch a single book, retrying failed lookups up to [`FETCH_RETRIES`] times.
    pub async fn get_by_id(&self, id: BookId) -> ServiceResult<BookDto> {
        match self.find_with_retry(id).await {
            Ok(Some(book)) => Ok(book.into()),
            Ok(None) => Err(ServiceError::NotFound(id)),
            Err(source) => Err(ServiceError::Fetch { id, source }),
        }
    }

    async fn find_with_retry(&self, id: BookId) -> StoreResult<Option<Book>> {
        let mut attempt = 0;
        loop {
            match self.repository.find_by_id(id).await {
                Ok(found) => return Ok(found),
                Err(e) if attempt < FETCH_RETRIES => {
                    attempt += 1;
                    tracing::warn!(book_id = %id, attempt, error = %e, "Book lookup failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Overwrite title, author and year of an existing book. The id is kept.
    pub async fn update(&self, id: BookId, dto: BookDto) -> ServiceResult<BookDto> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        book.apply(dto.into_changes());

        let rows = self.repository.update(&book).await?;
        if rows == 0 {
            // Deleted between the lookup and the update.
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!(book_id = %id, "Book updated");
        Ok(book.into())
    }

    /// Remove a book.
    pub async fn delete(&self, id: BookId) -> ServiceResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(id));
        }

        self.repository.delete_by_id(id).await.map_err(|e| match e {
            StoreError::BookNotFound(_) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        })?;

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Total number of books.
    pub async fn count_books(&self) -> ServiceResult<u64> {
        Ok(self.repository.count().await?)
    }

    /// Books by one author published within an inclusive year range.
    pub async fn find_by_author_and_year_range(
        &self,
        range: &YearRange,
    ) -> ServiceResult<Vec<BookDto>> {
        let books = self
            .repository
            .find_by_author_and_year_range(&range.author, range.start_year, range.end_year)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    /// All books, one at a time, each after the configured delay.
    ///
    /// The set of books is read once up front. Dropping the stream cancels
    /// any pending delay.
    pub async fn stream_all_books(
        &self,
    ) -> ServiceResult<impl Stream<Item = BookDto> + Send + 'static + use<>> {
        let books = self.repository.find_all().await?;
        tracing::debug!(count = books.len(), "Streaming books");
        Ok(paced(
            books.into_iter().map(BookDto::from),
            self.stream_delay,
        ))
    }
}

impl std::fmt::Debug for BookService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookService")
            .field("stream_delay", &self.stream_delay)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
