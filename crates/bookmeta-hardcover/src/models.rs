//! Hardcover GraphQL schemas and their mapping to `Book`

use bookmeta_core::{authors_from_names, first_isbn10, first_isbn13, validate_url, Book};
use serde::{Deserialize, Serialize};

pub(crate) const SEARCH_QUERY: &str = r#"
  query Search($query: String!, $query_type: String!, $per_page: Int!) {
    search(query: $query, query_type: $query_type, per_page: $per_page) {
      results
      ids
      query
      query_type
      page
      per_page
    }
  }
"#;

#[derive(Debug, Serialize)]
pub(crate) struct GraphQLRequest<'a> {
    pub query: &'a str,
    pub variables: SearchVariables<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchVariables<'a> {
    pub query: &'a str,
    pub query_type: &'a str,
    pub per_page: u32,
}

impl<'a> GraphQLRequest<'a> {
    pub fn search(query: &'a str, per_page: u32) -> Self {
        Self {
            query: SEARCH_QUERY,
            variables: SearchVariables {
                query,
                query_type: "book",
                per_page,
            },
        }
    }
}

/// GraphQL envelope; `data` and `errors` may each be absent.
///
/// `data` is decoded only after `errors` has been checked.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLResponse {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLError {
    pub message: String,
    pub extensions: Option<GraphQLErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLErrorExtensions {
    pub code: Option<String>,
}

impl GraphQLError {
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub search: SearchResults,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
    pub results: Vec<BookResult>,
    pub ids: Vec<i64>,
    pub query: String,
    pub query_type: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookResult {
    pub id: i64,
    pub title: String,
    #[allow(dead_code)]
    pub subtitle: Option<String>,
    pub slug: String,
    pub release_year: Option<i64>,
    pub pages: Option<f64>,
    pub author_names: Option<Vec<String>>,
    pub image: Option<String>,
    pub isbns: Option<Vec<String>>,
}

pub(crate) fn result_to_book(result: BookResult) -> Option<Book> {
    let isbns = result.isbns.unwrap_or_default();

    let book = Book::new(result.title)?
        .with_authors(authors_from_names(result.author_names.unwrap_or_default()))
        .with_publish_date(result.release_year.map(|y| y.to_string()))
        .with_isbn10(first_isbn10(&isbns))
        .with_isbn13(first_isbn13(&isbns))
        .with_page_count(result.pages)
        .with_cover_image_url(result.image.as_deref().and_then(validate_url));

    Some(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GraphQLRequest::search("9780201616224", 1)).unwrap();
        assert_eq!(body["query"], SEARCH_QUERY);
        assert_eq!(
            body["variables"],
            serde_json::json!({
                "query": "9780201616224",
                "query_type": "book",
                "per_page": 1
            })
        );
    }

    #[test]
    fn test_error_code() {
        let err: GraphQLError = serde_json::from_value(serde_json::json!({
            "message": "Rate limit exceeded",
            "extensions": { "code": "RATE_LIMITED" }
        }))
        .unwrap();
        assert_eq!(err.code(), Some("RATE_LIMITED"));

        let bare: GraphQLError =
            serde_json::from_value(serde_json::json!({ "message": "boom" })).unwrap();
        assert_eq!(bare.code(), None);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let result: BookResult = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Test Book",
            "subtitle": null,
            "slug": "test-book",
            "release_year": null,
            "pages": null,
            "author_names": [],
            "image": null,
            "isbns": []
        }))
        .unwrap();

        let book = result_to_book(result).unwrap();
        assert!(book.publish_date().is_none());
        assert!(book.page_count().is_none());
        assert!(book.cover_image_url().is_none());
        assert!(book.authors().is_empty());
    }

    #[test]
    fn test_release_year_becomes_publish_date() {
        let result: BookResult = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Clean Code",
            "slug": "clean-code",
            "release_year": 2008,
            "image": "/relative/path.jpg"
        }))
        .unwrap();

        let book = result_to_book(result).unwrap();
        assert_eq!(book.publish_date(), Some("2008"));
        // Relative image paths are not URLs
        assert!(book.cover_image_url().is_none());
    }
}
