//! Hardcover client for bookmeta
//!
//! Hardcover exposes a single GraphQL `search` query, used for both ISBN
//! lookups (one result) and text search (twenty results). A 200 response
//! may still carry GraphQL `errors`, which are checked before `data`.

mod client;
mod config;
mod models;

pub use client::{HardcoverClient, GRAPHQL_ENDPOINT};
pub use config::{ConfigError, HardcoverConfig, API_KEY_ENV};
