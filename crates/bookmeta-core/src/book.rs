//! Platform-agnostic book record
//!
//! Contains only the fields universally available across Open Library,
//! Google Books and Hardcover. A `Book` is built once per provider item
//! and is not modified afterwards.

use crate::author::Author;
use crate::branded::{Isbn10, Isbn13, Url};
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "non_empty")]
    title: String,
    #[serde(default)]
    authors: Vec<Author>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_opt"
    )]
    publisher: Option<String>,
    /// Format varies by source ("1999", "2008-08-01", "Aug 1, 2008")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    isbn10: Option<Isbn10>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    isbn13: Option<Isbn13>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cover_image_url: Option<Url>,
}

impl Book {
    /// Start a record with only a title; `None` if the title is empty
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title,
            authors: Vec::new(),
            publisher: None,
            publish_date: None,
            isbn10: None,
            isbn13: None,
            page_count: None,
            cover_image_url: None,
        })
    }

    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    /// Empty publisher names are treated as absent
    pub fn with_publisher(mut self, publisher: Option<String>) -> Self {
        self.publisher = publisher.filter(|p| !p.is_empty());
        self
    }

    pub fn with_publish_date(mut self, publish_date: Option<String>) -> Self {
        self.publish_date = publish_date;
        self
    }

    pub fn with_isbn10(mut self, isbn10: Option<Isbn10>) -> Self {
        self.isbn10 = isbn10;
        self
    }

    pub fn with_isbn13(mut self, isbn13: Option<Isbn13>) -> Self {
        self.isbn13 = isbn13;
        self
    }

    /// Keeps only positive page counts; medians are rounded
    pub fn with_page_count(mut self, pages: Option<f64>) -> Self {
        self.page_count = pages.and_then(positive_page_count);
        self
    }

    pub fn with_cover_image_url(mut self, url: Option<Url>) -> Self {
        self.cover_image_url = url;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn publish_date(&self) -> Option<&str> {
        self.publish_date.as_deref()
    }

    pub fn isbn10(&self) -> Option<&Isbn10> {
        self.isbn10.as_ref()
    }

    pub fn isbn13(&self) -> Option<&Isbn13> {
        self.isbn13.as_ref()
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn cover_image_url(&self) -> Option<&Url> {
        self.cover_image_url.as_ref()
    }
}

fn positive_page_count(pages: f64) -> Option<u32> {
    if !pages.is_finite() {
        return None;
    }
    let rounded = pages.round();
    (1.0..=f64::from(u32::MAX))
        .contains(&rounded)
        .then_some(rounded as u32)
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::custom("expected a non-empty string"));
    }
    Ok(value)
}

fn non_empty_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if value.is_empty() => Err(de::Error::custom("expected a non-empty string")),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branded::{validate_isbn13, validate_url};

    #[test]
    fn test_empty_title_rejected() {
        assert!(Book::new("").is_none());
    }

    #[test]
    fn test_minimal_book_has_no_optional_fields() {
        let book = Book::new("Minimal Book").unwrap();
        assert_eq!(book.title(), "Minimal Book");
        assert!(book.authors().is_empty());
        assert!(book.publisher().is_none());
        assert!(book.publish_date().is_none());
        assert!(book.isbn10().is_none());
        assert!(book.isbn13().is_none());
        assert!(book.page_count().is_none());
        assert!(book.cover_image_url().is_none());
    }

    #[test]
    fn test_page_count_must_be_positive() {
        let book = Book::new("t").unwrap();
        assert_eq!(book.clone().with_page_count(Some(352.0)).page_count(), Some(352));
        assert_eq!(book.clone().with_page_count(Some(0.0)).page_count(), None);
        assert_eq!(book.clone().with_page_count(Some(-3.0)).page_count(), None);
        assert_eq!(book.clone().with_page_count(Some(f64::NAN)).page_count(), None);
        assert_eq!(book.with_page_count(Some(463.5)).page_count(), Some(464));
    }

    #[test]
    fn test_empty_publisher_is_absent() {
        let book = Book::new("t").unwrap().with_publisher(Some(String::new()));
        assert!(book.publisher().is_none());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_value(Book::new("Minimal Book").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Minimal Book", "authors": [] })
        );
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let book = Book::new("The Pragmatic Programmer")
            .unwrap()
            .with_authors(vec![Author::new("Andrew Hunt").unwrap()])
            .with_isbn13(validate_isbn13("9780201616224"))
            .with_cover_image_url(validate_url("https://covers.openlibrary.org/b/id/1-L.jpg"))
            .with_page_count(Some(352.0));

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["isbn13"], "9780201616224");
        assert_eq!(json["pageCount"], 352);
        assert_eq!(
            json["coverImageUrl"],
            "https://covers.openlibrary.org/b/id/1-L.jpg"
        );
        assert_eq!(json["authors"][0]["name"], "Andrew Hunt");

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_deserialize_rejects_invalid_brands() {
        let bad = serde_json::json!({ "title": "t", "isbn10": "nope" });
        assert!(serde_json::from_value::<Book>(bad).is_err());

        let empty_title = serde_json::json!({ "title": "" });
        assert!(serde_json::from_value::<Book>(empty_title).is_err());
    }
}
