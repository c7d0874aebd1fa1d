//! Open Library client for bookmeta
//!
//! ISBN lookups use the edition endpoint (`/isbn/{isbn}.json`); text
//! search uses `/search.json`. Both shapes are mapped to the canonical
//! [`bookmeta_core::Book`].
//!
//! Author names on editions are the author keys with the `/authors/`
//! prefix removed (`/authors/OL123A` becomes `OL123A`), since the edition
//! payload carries no display names.

mod client;
mod models;

pub use client::{OpenLibraryClient, BASE_URL};
