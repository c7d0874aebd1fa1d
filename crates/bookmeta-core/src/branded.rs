//! Validated identifier types
//!
//! Each newtype can only be built through `parse`, which checks the
//! pattern and returns `None` on mismatch. No checksum is computed for
//! ISBNs: the pattern alone decides membership.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

lazy_static! {
    static ref ISBN10_PATTERN: Regex = Regex::new(r"^\d{9}[\dX]$").unwrap();
    static ref ISBN13_PATTERN: Regex = Regex::new(r"^\d{13}$").unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r"^https?://.+").unwrap();
}

macro_rules! branded_string {
    ($(#[$meta:meta])* $name:ident, $label:literal, $check:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validate `value` and wrap it, or `None` if it does not match.
            pub fn parse(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                let check: fn(&str) -> bool = $check;
                check(&value).then_some(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(raw.clone()).ok_or_else(|| {
                    de::Error::custom(format!("invalid {}: {:?}", $label, raw))
                })
            }
        }
    };
}

branded_string!(
    /// ISBN-10: nine digits followed by a digit or `X`
    Isbn10,
    "ISBN-10",
    |s| ISBN10_PATTERN.is_match(s)
);

branded_string!(
    /// ISBN-13: thirteen digits
    Isbn13,
    "ISBN-13",
    |s| ISBN13_PATTERN.is_match(s)
);

branded_string!(
    /// Generic book identifier (ISBN, OLID, volume id, ...)
    BookId,
    "book id",
    |s| !s.is_empty()
);

branded_string!(
    /// Absolute `http://` or `https://` URL
    Url,
    "URL",
    |s| URL_PATTERN.is_match(s)
);

pub fn validate_isbn10(value: &str) -> Option<Isbn10> {
    Isbn10::parse(value)
}

pub fn validate_isbn13(value: &str) -> Option<Isbn13> {
    Isbn13::parse(value)
}

pub fn validate_url(value: &str) -> Option<Url> {
    Url::parse(value)
}

/// First entry matching the ISBN-10 pattern, in input order.
///
/// Malformed entries are skipped, so `["invalid", "0132350882"]` yields
/// `0132350882`.
pub fn first_isbn10<I, S>(candidates: I) -> Option<Isbn10>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .find_map(|candidate| validate_isbn10(candidate.as_ref()))
}

/// First entry matching the ISBN-13 pattern, in input order.
pub fn first_isbn13<I, S>(candidates: I) -> Option<Isbn13>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .find_map(|candidate| validate_isbn13(candidate.as_ref()))
}
