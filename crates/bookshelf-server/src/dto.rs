//! Wire-facing book shape and its mapping to the domain entity.
//!
//! `BookDto` is what clients send and receive. It is deliberately lenient
//! on input: absent or null fields deserialize to empty values so that they
//! are reported by validation with a per-field message instead of failing
//! JSON parsing as a whole.

use bookshelf_core::{Book, BookChanges, BookId};
use serde::{Deserialize, Deserializer, Serialize};

/// Book as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    /// Server-assigned id. Ignored on create and update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_year: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Mapping
// ============================================================================

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title,
            author: book.author,
            published_year: book.published_year,
        }
    }
}

impl BookDto {
    /// A new entity with a freshly generated id; any client-supplied id is dropped.
    pub fn into_entity(self) -> Book {
        Book::new(self.title, self.author, self.published_year)
    }

    /// The mutable fields, for applying to an existing book.
    pub fn into_changes(self) -> BookChanges {
        BookChanges {
            title: self.title,
            author: self.author,
            published_year: self.published_year,
        }
    }
}

/// Response for GET /books/count.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_serializes_camel_case() {
        let dto = BookDto::from(Book {
            id: BookId::from_uuid(Uuid::nil()),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: 1965,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["author"], "Frank Herbert");
        assert_eq!(json["publishedYear"], 1965);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let dto: BookDto = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(dto, BookDto::default());
    }

    #[test]
    fn test_into_entity_ignores_client_id() {
        let client_id = BookId::new();
        let dto = BookDto {
            id: Some(client_id),
            title: "T".to_string(),
            author: "A".to_string(),
            published_year: 2020,
        };
        let book = dto.into_entity();
        assert_ne!(book.id, client_id);
        assert_eq!(book.title, "T");
        assert_eq!(book.author, "A");
        assert_eq!(book.published_year, 2020);
    }

    #[test]
    fn test_into_changes() {
        let dto: BookDto =
            serde_json::from_str(r#"{"title":"New","author":"Else","publishedYear":2001}"#)
                .unwrap();
        let changes = dto.into_changes();
        assert_eq!(changes.title, "New");
        assert_eq!(changes.author, "Else");
        assert_eq!(changes.published_year, 2001);
    }
}
