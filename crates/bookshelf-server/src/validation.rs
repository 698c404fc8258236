//! Syntactic validation of request bodies and query parameters.
//!
//! Failures are collected per field into [`FieldErrors`] and rendered as a
//! `{ field: message }` object with status 400. Nothing that fails here
//! reaches the service layer.

use std::collections::BTreeMap;
use std::fmt;

use bookshelf_core::{MIN_PUBLISHED_YEAR, max_published_year};
use serde::{Deserialize, Serialize};

use crate::dto::BookDto;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Field name to message mapping for failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message recorded for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn check<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Input that must be checked before it is acted on.
pub trait Validate {
    /// The checked form handed to handlers.
    type Valid;

    fn validate(self) -> Result<Self::Valid, FieldErrors>;
}

// ============================================================================
// Book bodies
// ============================================================================

impl Validate for BookDto {
    type Valid = BookDto;

    fn validate(self) -> Result<Self::Valid, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Title cannot be blank");
        }
        if self.author.trim().is_empty() {
            errors.add("author", "Author cannot be blank");
        }
        if self.published_year < MIN_PUBLISHED_YEAR {
            errors.add("publishedYear", "Published year must be at least 1900");
        } else if self.published_year > max_published_year() {
            errors.add("publishedYear", "Published year cannot be in the future");
        }

        errors.check(self)
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Raw `?page=&size=` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Checked pagination: `page >= 0`, `1 <= size <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub size: u64,
}

impl Validate for PageParams {
    type Valid = Page;

    fn validate(self) -> Result<Page, FieldErrors> {
        let mut errors = FieldErrors::new();

        let page = match self.page {
            None => {
                errors.add("page", "Page number is required.");
                0
            }
            Some(p) => u64::try_from(p).unwrap_or_else(|_| {
                errors.add("page", "Page number can't be negative.");
                0
            }),
        };

        let size = match self.size {
            None => {
                errors.add("size", "Page size is required.");
                0
            }
            Some(s) if s < 1 => {
                errors.add("size", "Page size can't be less than 1.");
                0
            }
            Some(s) if s > MAX_PAGE_SIZE => {
                errors.add("size", "Page size maximum value is 100.");
                0
            }
            Some(s) => s.unsigned_abs(),
        };

        errors.check(Page { page, size })
    }
}

// ============================================================================
// Author / year range search
// ============================================================================

/// Raw `?author=&startYear=&endYear=` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRangeParams {
    pub author: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// Checked search: non-blank author, `start_year <= end_year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRange {
    pub author: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl Validate for YearRangeParams {
    type Valid = YearRange;

    fn validate(self) -> Result<YearRange, FieldErrors> {
        let mut errors = FieldErrors::new();

        let author = self.author.unwrap_or_default();
        if author.trim().is_empty() {
            errors.add("author", "Author cannot be blank");
        }
        if self.start_year.is_none() {
            errors.add("startYear", "Start year is required.");
        }
        if self.end_year.is_none() {
            errors.add("endYear", "End year is required.");
        }

        let start_year = self.start_year.unwrap_or_default();
        let end_year = self.end_year.unwrap_or_default();
        if self.start_year.is_some() && self.end_year.is_some() && start_year > end_year {
            errors.add("endYear", "End year can't be before start year.");
        }

        errors.check(YearRange {
            author,
            start_year,
            end_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, year: i32) -> BookDto {
        BookDto {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            published_year: year,
        }
    }

    fn page(page: i64, size: i64) -> PageParams {
        PageParams {
            page: Some(page),
            size: Some(size),
        }
    }

    #[test]
    fn test_valid_book_passes() {
        let dto = book("T", "A", 2020);
        assert_eq!(dto.clone().validate().unwrap(), dto);
    }

    #[test]
    fn test_blank_fields_are_each_reported() {
        let errors = book("", "   ", 1800).validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("title"), Some("Title cannot be blank"));
        assert_eq!(errors.get("author"), Some("Author cannot be blank"));
        assert_eq!(
            errors.get("publishedYear"),
            Some("Published year must be at least 1900")
        );
    }

    #[test]
    fn test_year_bounds() {
        assert!(book("T", "A", 1900).validate().is_ok());
        assert!(book("T", "A", max_published_year()).validate().is_ok());

        let errors = book("T", "A", max_published_year() + 1)
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.get("publishedYear"),
            Some("Published year cannot be in the future")
        );
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page(0, 1).validate().unwrap(), Page { page: 0, size: 1 });
        assert_eq!(page(3, 100).validate().unwrap(), Page { page: 3, size: 100 });

        let errors = page(-1, 10).validate().unwrap_err();
        assert_eq!(errors.get("page"), Some("Page number can't be negative."));

        let errors = page(0, 0).validate().unwrap_err();
        assert_eq!(errors.get("size"), Some("Page size can't be less than 1."));

        let errors = page(0, 101).validate().unwrap_err();
        assert_eq!(errors.get("size"), Some("Page size maximum value is 100."));
    }

    #[test]
    fn test_page_and_size_reported_together() {
        let errors = page(-1, 0).validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        let errors = PageParams::default().validate().unwrap_err();
        assert_eq!(errors.get("page"), Some("Page number is required."));
        assert_eq!(errors.get("size"), Some("Page size is required."));
    }

    #[test]
    fn test_page_params_from_query_string() {
        let params: PageParams = serde_urlencoded::from_str("page=2&size=10").unwrap();
        assert_eq!(params.validate().unwrap(), Page { page: 2, size: 10 });
    }

    #[test]
    fn test_year_range() {
        let params: YearRangeParams =
            serde_urlencoded::from_str("author=John+Doe&startYear=2019&endYear=2021").unwrap();
        assert_eq!(
            params.validate().unwrap(),
            YearRange {
                author: "John Doe".to_string(),
                start_year: 2019,
                end_year: 2021,
            }
        );

        let params: YearRangeParams =
            serde_urlencoded::from_str("author=John+Doe&startYear=2021&endYear=2019").unwrap();
        let errors = params.validate().unwrap_err();
        assert!(errors.get("endYear").is_some());

        let errors = YearRangeParams::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_field_errors_display_and_json() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Title cannot be blank");
        errors.add("author", "Author cannot be blank");
        errors.add("title", "ignored");

        assert_eq!(
            errors.to_string(),
            "author: Author cannot be blank; title: Title cannot be blank"
        );
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["title"], "Title cannot be blank");
    }
}
