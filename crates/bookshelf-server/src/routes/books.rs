//! Book CRUD routes.
//!
//! - POST /books - Create a book
//! - GET /books?page=&size= - One page of books
//! - GET /books/{id} - A single book
//! - PUT /books/{id} - Overwrite title, author and year
//! - DELETE /books/{id} - Remove a book
//! - GET /books/count - Number of books
//! - GET /books/search?author=&startYear=&endYear= - Books by author within a year range

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::dto::{BookDto, CountResponse};
use crate::error::ApiResult;
use crate::extract::{BookPath, ValidJson, ValidQuery};
use crate::state::AppState;
use crate::validation::{PageParams, YearRangeParams};

/// POST /books - Create a book.
///
/// # Response
///
/// - 200 OK: the created book, with its server-assigned id
/// - 400 Bad Request: `{ "title": "...", ... }` for each invalid field
/// - 409 Conflict: a book with this title and author exists
async fn create_book(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<BookDto>,
) -> ApiResult<Json<BookDto>> {
    let created = state.service().create(dto).await?;
    Ok(Json(created))
}

/// GET /books - One page of books in creation order.
///
/// # Response
///
/// - 200 OK: array of books
/// - 400 Bad Request: `page < 0`, `size < 1` or `size > 100`
async fn list_books(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> ApiResult<Json<Vec<BookDto>>> {
    let books = state.service().get_all(page).await?;
    tracing::debug!(page = page.page, size = page.size, count = books.len(), "Listed books");
    Ok(Json(books))
}

/// GET /books/{id} - A single book.
///
/// # Response
///
/// - 200 OK: the book
/// - 404 Not Found
async fn get_book(
    State(state): State<AppState>,
    BookPath(id): BookPath,
) -> ApiResult<Json<BookDto>> {
    Ok(Json(state.service().get_by_id(id).await?))
}

/// PUT /books/{id} - Overwrite title, author and year.
///
/// # Response
///
/// - 200 OK: the updated book (same id)
/// - 400 Bad Request: invalid fields
/// - 404 Not Found
async fn update_book(
    State(state): State<AppState>,
    BookPath(id): BookPath,
    ValidJson(dto): ValidJson<BookDto>,
) -> ApiResult<Json<BookDto>> {
    Ok(Json(state.service().update(id, dto).await?))
}

/// DELETE /books/{id} - Remove a book.
///
/// # Response
///
/// - 204 No Content
/// - 404 Not Found
async fn delete_book(
    State(state): State<AppState>,
    BookPath(id): BookPath,
) -> ApiResult<StatusCode> {
    state.service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /books/count - Number of stored books.
async fn count_books(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.service().count_books().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /books/search - Books by author published within `[startYear, endYear]`.
async fn search_books(
    State(state): State<AppState>,
    ValidQuery(range): ValidQuery<YearRangeParams>,
) -> ApiResult<Json<Vec<BookDto>>> {
    Ok(Json(
        state.service().find_by_author_and_year_range(&range).await?,
    ))
}

/// Build book routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/count", get(count_books))
        .route("/books/search", get(search_books))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
