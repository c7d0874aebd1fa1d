//! Author representation

use serde::{Deserialize, Serialize};

/// A book author or contributor
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Full name, never empty
    pub name: String,
}

impl Author {
    /// Create an author, or `None` when the name is empty
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self { name })
    }
}

/// Build an ordered author list, dropping empty names.
pub fn authors_from_names<I, S>(names: I) -> Vec<Author>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().filter_map(Author::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert!(Author::new("").is_none());
        assert_eq!(Author::new("Andrew Hunt").unwrap().name, "Andrew Hunt");
    }

    #[test]
    fn test_authors_from_names_keeps_order() {
        let authors = authors_from_names(["David Thomas", "", "Andrew Hunt"]);
        let names: Vec<_> = authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["David Thomas", "Andrew Hunt"]);
    }
}
