//! Book API client contract

use crate::book::Book;
use crate::errors::{BookApiError, Source};
use async_trait::async_trait;

/// Number of results requested by every `search` call
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Platform-agnostic book lookup, implemented once per provider
#[async_trait]
pub trait BookApiClient: Send + Sync {
    /// Fetch the best match for an ISBN (10 or 13 digit).
    ///
    /// Zero results from the provider is `BookApiError::NotFound`.
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, BookApiError>;

    /// Free-text search returning up to [`SEARCH_PAGE_SIZE`] books.
    ///
    /// Zero results is an empty vector, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Book>, BookApiError>;

    /// Provider answering the calls
    fn source(&self) -> Source;
}
