//! Google Books client for bookmeta
//!
//! Both operations go through the `/volumes` search endpoint: ISBN lookups
//! query `isbn:{isbn}` and keep the first item, text search asks for up to
//! twenty items. Identifiers come from the typed `industryIdentifiers`
//! list rather than from pattern matching.

mod client;
mod models;

pub use client::{GoogleBooksClient, BASE_URL};
