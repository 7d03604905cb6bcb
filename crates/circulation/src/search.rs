//! Catalog search kinds

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a search term is matched against the catalog.
///
/// - `Title` / `Author`: case-insensitive prefix match
/// - `Isbn`: exact string match
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Title,
    Author,
    Isbn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_str() {
        assert_eq!(SearchKind::from_str("title"), Ok(SearchKind::Title));
        assert_eq!(SearchKind::from_str("author"), Ok(SearchKind::Author));
        assert_eq!(SearchKind::from_str("isbn"), Ok(SearchKind::Isbn));
        assert!(SearchKind::from_str("genre").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SearchKind::Title.to_string(), "title");
        assert_eq!(SearchKind::Isbn.to_string(), "isbn");
    }
}
