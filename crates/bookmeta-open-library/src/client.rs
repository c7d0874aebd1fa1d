//! Open Library client
//!
//! API docs: https://openlibrary.org/developers/api
//! No rate-limit signal is exposed by the provider.

use crate::models::{edition_to_book, search_doc_to_book, Edition, SearchResponse};
use async_trait::async_trait;
use bookmeta_core::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use bookmeta_core::{Book, BookApiClient, BookApiError, Source, SEARCH_PAGE_SIZE};
use std::sync::Arc;

const SOURCE: Source = Source::OpenLibrary;

pub const BASE_URL: &str = "https://openlibrary.org";

pub struct OpenLibraryClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_base_url(transport, BASE_URL)
    }

    pub fn with_base_url(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn edition_url(&self, isbn: &str) -> Result<String, HttpError> {
        let mut url = parse_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl {
                url: self.base_url.clone(),
            })?
            .pop_if_empty()
            .push("isbn")
            .push(&format!("{}.json", isbn));
        Ok(url.into())
    }

    fn search_url(&self, query: &str) -> Result<String, HttpError> {
        let limit = SEARCH_PAGE_SIZE.to_string();
        let url = url::Url::parse_with_params(
            &format!("{}/search.json", self.base_url),
            [("q", query), ("limit", limit.as_str())],
        )
        .map_err(|_| HttpError::InvalidUrl {
            url: self.base_url.clone(),
        })?;
        Ok(url.into())
    }

    async fn fetch(&self, url: String, identifier: &str) -> Result<HttpResponse, BookApiError> {
        tracing::debug!("GET {} ({})", url, SOURCE);
        self.transport
            .execute(HttpRequest::get(url))
            .await
            .map_err(|e| map_http_error(e, identifier))
    }
}

#[async_trait]
impl BookApiClient for OpenLibraryClient {
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, BookApiError> {
        let url = self
            .edition_url(isbn)
            .map_err(|e| map_http_error(e, isbn))?;
        let response = self.fetch(url, isbn).await?;
        let edition: Edition = response.json().map_err(map_parse_error)?;

        edition_to_book(edition)
            .ok_or_else(|| BookApiError::parse(SOURCE, "edition has an empty title"))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, BookApiError> {
        let url = self
            .search_url(query)
            .map_err(|e| map_http_error(e, query))?;
        let response = self.fetch(url, query).await?;
        let body: SearchResponse = response.json().map_err(map_parse_error)?;

        tracing::debug!(
            "Open Library search '{}': {} docs of {} found",
            query,
            body.docs.len(),
            body.num_found
        );

        body.docs
            .into_iter()
            .map(|doc| {
                search_doc_to_book(doc)
                    .ok_or_else(|| BookApiError::parse(SOURCE, "search doc has an empty title"))
            })
            .collect()
    }

    fn source(&self) -> Source {
        SOURCE
    }
}

fn parse_url(raw: &str) -> Result<url::Url, HttpError> {
    url::Url::parse(raw).map_err(|_| HttpError::InvalidUrl {
        url: raw.to_string(),
    })
}

/// 404 means the ISBN is unknown; every other transport failure is a
/// network error. Open Library has no rate-limit signal.
fn map_http_error(error: HttpError, identifier: &str) -> BookApiError {
    match error {
        HttpError::Status { status: 404, .. } => BookApiError::not_found(SOURCE, identifier),
        other => BookApiError::network(other.to_string()),
    }
}

fn map_parse_error(error: serde_json::Error) -> BookApiError {
    tracing::warn!("Invalid {} response: {}", SOURCE, error);
    BookApiError::parse(SOURCE, error.to_string())
}
