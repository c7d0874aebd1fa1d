//! Canonical book metadata shared by the bookmeta provider clients
//!
//! This crate provides:
//! - `Book` / `Author`: the record every client returns
//! - `Isbn10`, `Isbn13`, `BookId`, `Url`: pattern-validated identifiers
//! - `BookApiError`: the four failure kinds a client may report
//! - `BookApiClient`: the `get_by_isbn` / `search` contract
//! - `HttpTransport`: the injected request executor

pub mod author;
pub mod book;
pub mod branded;
pub mod errors;
pub mod http;
pub mod service;

pub use author::*;
pub use book::*;
pub use branded::*;
pub use errors::*;
pub use service::*;
