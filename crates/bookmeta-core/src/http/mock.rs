//! Canned transport for tests
//!
//! Responses are served in the order they were queued. Every executed
//! request is recorded so tests can assert on URLs, headers and bodies.

use super::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport answering once with `200` and the given JSON body
    pub fn with_json(body: serde_json::Value) -> Self {
        let transport = Self::new();
        transport.push_json(body);
        transport
    }

    /// Transport answering once with `200` and a raw body
    pub fn with_body(body: impl Into<String>) -> Self {
        let transport = Self::new();
        transport.push_body(body);
        transport
    }

    /// Transport failing once with the given error
    pub fn with_error(error: HttpError) -> Self {
        let transport = Self::new();
        transport.push_error(error);
        transport
    }

    pub fn push_json(&self, body: serde_json::Value) {
        self.push_body(body.to_string());
    }

    pub fn push_body(&self, body: impl Into<String>) {
        self.push(Ok(HttpResponse {
            status: 200,
            body: body.into(),
            headers: HashMap::from([(
                "content-type".to_string(),
                "application/json".to_string(),
            )]),
        }));
    }

    pub fn push_error(&self, error: HttpError) {
        self.push(Err(error));
    }

    fn push(&self, outcome: Result<HttpResponse, HttpError>) {
        self.outcomes
            .lock()
            .expect("mock transport lock poisoned")
            .push_back(outcome);
    }

    /// Requests executed so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("mock transport lock poisoned")
            .clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .expect("mock transport lock poisoned")
            .push(request);

        self.outcomes
            .lock()
            .expect("mock transport lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(HttpError::RequestFailed {
                    message: "no response queued".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_in_order_and_records() {
        let transport = MockTransport::with_json(serde_json::json!({ "n": 1 }));
        transport.push_error(HttpError::Timeout);

        let first = transport
            .execute(HttpRequest::get("https://example.org/a"))
            .await
            .unwrap();
        assert_eq!(first.body, r#"{"n":1}"#);

        let second = transport
            .execute(HttpRequest::get("https://example.org/b"))
            .await;
        assert_eq!(second.unwrap_err(), HttpError::Timeout);

        let third = transport
            .execute(HttpRequest::get("https://example.org/c"))
            .await;
        assert!(matches!(third, Err(HttpError::RequestFailed { .. })));

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.org/a",
                "https://example.org/b",
                "https://example.org/c"
            ]
        );
    }
}
