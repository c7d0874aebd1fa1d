//! Hardcover GraphQL client
//!
//! API docs: https://docs.hardcover.app/api/getting-started/
//! Requires an API key sent in the `authorization` header.

use crate::config::{ConfigError, HardcoverConfig};
use crate::models::{result_to_book, GraphQLRequest, GraphQLResponse, SearchData, SearchResults};
use async_trait::async_trait;
use bookmeta_core::http::{HttpError, HttpRequest, HttpTransport};
use bookmeta_core::{Book, BookApiClient, BookApiError, Source, SEARCH_PAGE_SIZE};
use std::sync::Arc;

const SOURCE: Source = Source::Hardcover;

/// Extension code Hardcover attaches to throttled GraphQL requests
const RATE_LIMITED_CODE: &str = "RATE_LIMITED";

const EMPTY_TITLE: &str = "search result has an empty title";

pub const GRAPHQL_ENDPOINT: &str = "https://api.hardcover.app/v1/graphql";

pub struct HardcoverClient {
    transport: Arc<dyn HttpTransport>,
    config: HardcoverConfig,
    endpoint: String,
}

impl HardcoverClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: HardcoverConfig) -> Self {
        Self::with_endpoint(transport, config, GRAPHQL_ENDPOINT)
    }

    /// Build a client whose key comes from `HARDCOVER_API_KEY`
    pub fn from_env(transport: Arc<dyn HttpTransport>) -> Result<Self, ConfigError> {
        Ok(Self::new(transport, HardcoverConfig::from_env()?))
    }

    pub fn with_endpoint(
        transport: Arc<dyn HttpTransport>,
        config: HardcoverConfig,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            config,
            endpoint: endpoint.into(),
        }
    }

    /// Run the search query and return its payload, or `None` when the
    /// response carries neither `data` nor `errors`.
    async fn execute_search(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Option<SearchResults>, BookApiError> {
        let request = HttpRequest::post(self.endpoint.as_str())
            .with_header("authorization", self.config.api_key())
            .with_json(&GraphQLRequest::search(query, per_page))
            .map_err(|e| BookApiError::parse(SOURCE, e.to_string()))?;

        tracing::debug!("POST {} ({}, per_page={})", self.endpoint, SOURCE, per_page);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| map_http_error(e, query))?;

        let body: GraphQLResponse = response.json().map_err(|e| {
            tracing::warn!("Invalid {} response: {}", SOURCE, e);
            BookApiError::parse(SOURCE, e.to_string())
        })?;

        check_graphql_errors(&body)?;

        body.data
            .map(serde_json::from_value::<SearchData>)
            .transpose()
            .map(|data| data.map(|d| d.search))
            .map_err(|e| {
                tracing::warn!("Invalid {} search payload: {}", SOURCE, e);
                BookApiError::parse(SOURCE, e.to_string())
            })
    }
}

#[async_trait]
impl BookApiClient for HardcoverClient {
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, BookApiError> {
        let result = self
            .execute_search(isbn, 1)
            .await?
            .and_then(|search| search.results.into_iter().next())
            .ok_or_else(|| BookApiError::not_found(SOURCE, isbn))?;

        tracing::debug!("Hardcover book {} ({}) matched isbn {}", result.id, result.slug, isbn);

        result_to_book(result).ok_or_else(|| BookApiError::parse(SOURCE, EMPTY_TITLE))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, BookApiError> {
        let Some(search) = self.execute_search(query, SEARCH_PAGE_SIZE).await? else {
            return Ok(Vec::new());
        };

        tracing::debug!(
            "Hardcover search '{}' ({}): {} results, {} ids, page {} ({} per page)",
            search.query,
            search.query_type,
            search.results.len(),
            search.ids.len(),
            search.page,
            search.per_page
        );

        search
            .results
            .into_iter()
            .map(|result| {
                result_to_book(result).ok_or_else(|| BookApiError::parse(SOURCE, EMPTY_TITLE))
            })
            .collect()
    }

    fn source(&self) -> Source {
        SOURCE
    }
}

/// GraphQL reports failures inside a 200 response. Only the first error
/// is inspected: `RATE_LIMITED` is a rate limit, anything else a parse
/// error carrying the server's message.
fn check_graphql_errors(body: &GraphQLResponse) -> Result<(), BookApiError> {
    let Some(first) = body.errors.as_ref().and_then(|errors| errors.first()) else {
        return Ok(());
    };

    tracing::warn!(
        "{} GraphQL error ({}): {}",
        SOURCE,
        first.code().unwrap_or("no code"),
        first.message
    );

    if first.code() == Some(RATE_LIMITED_CODE) {
        return Err(BookApiError::rate_limit(SOURCE, None));
    }
    Err(BookApiError::parse(SOURCE, first.message.clone()))
}

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

    fn response(json: serde_json::Value) -> GraphQLResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_no_errors_passes() {
        assert!(check_graphql_errors(&response(serde_json::json!({}))).is_ok());
        assert!(check_graphql_errors(&response(serde_json::json!({ "errors": [] }))).is_ok());
    }

    #[test]
    fn test_first_error_decides() {
        let body = response(serde_json::json!({
            "errors": [
                { "message": "Invalid query", "extensions": { "code": "BAD_USER_INPUT" } },
                { "message": "Rate limit exceeded", "extensions": { "code": "RATE_LIMITED" } }
            ]
        }));
        assert_eq!(
            check_graphql_errors(&body).unwrap_err(),
            BookApiError::parse(SOURCE, "Invalid query")
        );
    }

    #[test]
    fn test_map_http_error() {
        let err = map_http_error(
            HttpError::Status {
                status: 404,
                retry_after_seconds: None,
            },
            "9780201616224",
        );
        assert_eq!(err, BookApiError::not_found(SOURCE, "9780201616224"));

        let err = map_http_error(
            HttpError::Status {
                status: 500,
                retry_after_seconds: None,
            },
            "q",
        );
        assert_eq!(err, BookApiError::network("HTTP status 500"));
    }
}
