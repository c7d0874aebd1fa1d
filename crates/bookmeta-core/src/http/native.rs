//! Native HTTP transport using reqwest

use super::{parse_retry_after, HttpError, HttpRequest, HttpResponse, HttpTransport, Method};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "bookmeta/0.1";

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn with_default_user_agent() -> Result<Self, HttpError> {
        Self::new(DEFAULT_USER_AGENT)
    }
}

fn request_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::RequestFailed {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(&request.url).map_err(|_| HttpError::InvalidUrl {
            url: request.url.clone(),
        })?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        tracing::trace!("{} {}", request.method.as_str(), request.url);

        let response = builder.send().await.map_err(request_error)?;
        let status = response.status();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect::<std::collections::HashMap<_, _>>();

        if !status.is_success() {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|v| parse_retry_after(v));
            return Err(HttpError::Status {
                status: status.as_u16(),
                retry_after_seconds,
            });
        }

        // Reading the full body releases the connection back to the pool
        let body = response.text().await.map_err(request_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
            headers,
        })
    }
}
