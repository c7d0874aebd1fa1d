//! Google Books client
//!
//! API docs: https://developers.google.com/books/docs/v1/using
//! Rate limiting is only visible as HTTP 429.

use crate::models::{volume_to_book, VolumesResponse};
use async_trait::async_trait;
use bookmeta_core::http::{HttpError, HttpRequest, HttpTransport};
use bookmeta_core::{Book, BookApiClient, BookApiError, Source, SEARCH_PAGE_SIZE};
use std::sync::Arc;

const SOURCE: Source = Source::GoogleBooks;

pub const BASE_URL: &str = "https://www.googleapis.com/books/v1";

pub struct GoogleBooksClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_base_url(transport, BASE_URL)
    }

    pub fn with_base_url(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn volumes_url(&self, params: &[(&str, &str)]) -> Result<String, HttpError> {
        let url = url::Url::parse_with_params(&format!("{}/volumes", self.base_url), params)
            .map_err(|_| HttpError::InvalidUrl {
                url: self.base_url.clone(),
            })?;
        Ok(url.into())
    }

    /// Run a `/volumes` query and decode the list response
    async fn volumes(
        &self,
        params: &[(&str, &str)],
        identifier: &str,
    ) -> Result<VolumesResponse, BookApiError> {
        let url = self
            .volumes_url(params)
            .map_err(|e| map_http_error(e, identifier))?;
        tracing::debug!("GET {} ({})", url, SOURCE);

        let response = self
            .transport
            .execute(HttpRequest::get(url))
            .await
            .map_err(|e| map_http_error(e, identifier))?;

        response.json().map_err(|e| {
            tracing::warn!("Invalid {} response: {}", SOURCE, e);
            BookApiError::parse(SOURCE, e.to_string())
        })
    }
}

#[async_trait]
impl BookApiClient for GoogleBooksClient {
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, BookApiError> {
        let query = format!("isbn:{}", isbn);
        let body = self.volumes(&[("q", query.as_str())], isbn).await?;

        let volume = match body.items {
            Some(items) if body.total_items > 0 => items.into_iter().next(),
            _ => None,
        }
        .ok_or_else(|| BookApiError::not_found(SOURCE, isbn))?;

        tracing::debug!("Google Books volume {} matched isbn {}", volume.id, isbn);

        volume_to_book(volume)
            .ok_or_else(|| BookApiError::parse(SOURCE, "volume has an empty title"))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, BookApiError> {
        let max_results = SEARCH_PAGE_SIZE.to_string();
        let body = self
            .volumes(&[("q", query), ("maxResults", max_results.as_str())], query)
            .await?;

        let items = body.items.unwrap_or_default();
        tracing::debug!(
            "Google Books search '{}': {} items of {} total",
            query,
            items.len(),
            body.total_items
        );

        items
            .into_iter()
            .map(|volume| {
                volume_to_book(volume)
                    .ok_or_else(|| BookApiError::parse(SOURCE, "volume has an empty title"))
            })
            .collect()
    }

    fn source(&self) -> Source {
        SOURCE
    }
}

/// 404 is an unknown volume and 429 a rate limit; anything else that
/// fails in transport is a network error.
fn map_http_error(error: HttpError, identifier: &str) -> BookApiError {
    match error {
        HttpError::Status { status: 404, .. } => BookApiError::not_found(SOURCE, identifier),
        HttpError::Status {
            status: 429,
            retry_after_seconds,
        } => BookApiError::rate_limit(SOURCE, retry_after_seconds),
        other => BookApiError::network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmeta_core::http::MockTransport;

    #[test]
    fn test_volumes_url() {
        let client = GoogleBooksClient::new(Arc::new(MockTransport::new()));
        assert_eq!(
            client.volumes_url(&[("q", "isbn:9780132350884")]).unwrap(),
            "https://www.googleapis.com/books/v1/volumes?q=isbn%3A9780132350884"
        );
        assert_eq!(
            client
                .volumes_url(&[("q", "clean code"), ("maxResults", "20")])
                .unwrap(),
            "https://www.googleapis.com/books/v1/volumes?q=clean+code&maxResults=20"
        );
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let err = map_http_error(
            HttpError::Status {
                status: 429,
                retry_after_seconds: Some(30),
            },
            "q",
        );
        assert_eq!(err, BookApiError::rate_limit(SOURCE, Some(30)));
    }
}
