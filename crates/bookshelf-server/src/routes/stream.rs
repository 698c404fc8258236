//! Server-Sent Events stream of all books.
//!
//! Endpoint: GET /books/stream
//!
//! Each stored book is sent as one `book` event, paced by the configured
//! stream delay, and the response ends after the last one.
//!
//! ```text
//! event: book
//! id: 6f1c...
//! data: {"id":"6f1c...","title":"TitleA","author":"AuthorA","publishedYear":2022}
//! ```

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::{Stream, StreamExt};

use crate::dto::BookDto;
use crate::error::ApiResult;
use crate::state::AppState;

/// Render one book as an SSE event. Books that fail to serialize are skipped.
fn book_event(book: &BookDto) -> Option<Event> {
    match serde_json::to_string(book) {
        Ok(data) => {
            let mut event = Event::default().event("book").data(data);
            if let Some(id) = book.id {
                event = event.id(id.to_string());
            }
            Some(event)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize book event");
            None
        }
    }
}

/// GET /books/stream - Stream all books as Server-Sent Events.
///
/// # Response
///
/// - 200 OK: SSE stream (Content-Type: text/event-stream)
async fn stream_books(
    State(state): State<AppState>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let books = state.service().stream_all_books().await?;

    tracing::info!("Client subscribed to book stream");

    let events = books.filter_map(|book| async move { book_event(&book).map(Ok) });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Build SSE stream routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/books/stream", get(stream_books))
}
