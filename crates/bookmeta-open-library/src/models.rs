//! Open Library response schemas and their mapping to `Book`

use bookmeta_core::{authors_from_names, first_isbn10, first_isbn13, validate_url, Book, Url};
use serde::Deserialize;

const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Edition returned by `/isbn/{isbn}.json`
#[derive(Debug, Deserialize)]
pub(crate) struct Edition {
    pub title: String,
    pub authors: Option<Vec<AuthorRef>>,
    pub publishers: Option<Vec<String>>,
    pub publish_date: Option<String>,
    pub isbn_10: Option<Vec<String>>,
    pub isbn_13: Option<Vec<String>>,
    pub number_of_pages: Option<f64>,
    pub covers: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorRef {
    pub key: String,
}

/// Response of `/search.json`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchDoc {
    pub title: String,
    pub author_name: Option<Vec<String>>,
    pub publisher: Option<Vec<String>>,
    pub first_publish_year: Option<i64>,
    pub isbn: Option<Vec<String>>,
    pub number_of_pages_median: Option<f64>,
    pub cover_i: Option<i64>,
}

/// Cover ids are positive; Open Library uses `-1` for "no cover"
pub(crate) fn cover_url(cover_id: i64) -> Option<Url> {
    if cover_id <= 0 {
        return None;
    }
    validate_url(&format!("{}/{}-L.jpg", COVERS_BASE_URL, cover_id))
}

/// The edition form only references authors by key (`/authors/OL123A`).
/// The key itself becomes the display name; resolving it would take an
/// extra request per author.
fn author_name_from_key(key: &str) -> String {
    key.strip_prefix("/authors/").unwrap_or(key).to_string()
}

pub(crate) fn edition_to_book(edition: Edition) -> Option<Book> {
    let authors = authors_from_names(
        edition
            .authors
            .unwrap_or_default()
            .iter()
            .map(|a| author_name_from_key(&a.key)),
    );

    let book = Book::new(edition.title)?
        .with_authors(authors)
        .with_publisher(edition.publishers.and_then(|p| p.into_iter().next()))
        .with_publish_date(edition.publish_date)
        .with_isbn10(edition.isbn_10.as_deref().and_then(first_isbn10))
        .with_isbn13(edition.isbn_13.as_deref().and_then(first_isbn13))
        .with_page_count(edition.number_of_pages)
        .with_cover_image_url(
            edition
                .covers
                .and_then(|c| c.first().copied())
                .and_then(cover_url),
        );

    Some(book)
}

pub(crate) fn search_doc_to_book(doc: SearchDoc) -> Option<Book> {
    let isbns = doc.isbn.unwrap_or_default();

    let book = Book::new(doc.title)?
        .with_authors(authors_from_names(doc.author_name.unwrap_or_default()))
        .with_publisher(doc.publisher.and_then(|p| p.into_iter().next()))
        .with_publish_date(doc.first_publish_year.map(|y| y.to_string()))
        .with_isbn10(first_isbn10(&isbns))
        .with_isbn13(first_isbn13(&isbns))
        .with_page_count(doc.number_of_pages_median)
        .with_cover_image_url(doc.cover_i.and_then(cover_url));

    Some(book)
}
