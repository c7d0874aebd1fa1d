//! Closed error taxonomy for book API clients
//!
//! Every client failure is reported as one of four variants. All but
//! `Network` name the provider that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Provider identifier used for error attribution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    OpenLibrary,
    GoogleBooks,
    Hardcover,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::OpenLibrary => "open-library",
            Source::GoogleBooks => "google-books",
            Source::Hardcover => "hardcover",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookApiError {
    /// Connection, timeout or unexpected HTTP failure
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("No book found for '{identifier}' on {provider}")]
    NotFound { identifier: String, provider: Source },

    /// Response body did not match the provider schema
    #[error("Parse error from {provider}: {message}")]
    Parse { message: String, provider: Source },

    #[error("Rate limited by {provider}")]
    RateLimit {
        retry_after_seconds: Option<u64>,
        provider: Source,
    },
}

impl BookApiError {
    pub fn network(message: impl Into<String>) -> Self {
        BookApiError::Network {
            message: message.into(),
        }
    }

    pub fn not_found(provider: Source, identifier: impl Into<String>) -> Self {
        BookApiError::NotFound {
            identifier: identifier.into(),
            provider,
        }
    }

    pub fn parse(provider: Source, message: impl Into<String>) -> Self {
        BookApiError::Parse {
            message: message.into(),
            provider,
        }
    }

    pub fn rate_limit(provider: Source, retry_after_seconds: Option<u64>) -> Self {
        BookApiError::RateLimit {
            retry_after_seconds,
            provider,
        }
    }

    /// Provider that raised the error; `None` for network failures
    pub fn provider(&self) -> Option<Source> {
        match self {
            BookApiError::Network { .. } => None,
            BookApiError::NotFound { provider, .. }
            | BookApiError::Parse { provider, .. }
            | BookApiError::RateLimit { provider, .. } => Some(*provider),
        }
    }

    /// Stable tag name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            BookApiError::Network { .. } => "NetworkError",
            BookApiError::NotFound { .. } => "NotFoundError",
            BookApiError::Parse { .. } => "ParseError",
            BookApiError::RateLimit { .. } => "RateLimitError",
        }
    }
}
