//! Isbn - Validated 13-digit book identifier
//!
//! Catalog entries are keyed by ISBN-13. Only the digit count is checked;
//! the check digit is not verified.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in an ISBN-13
pub const ISBN_LEN: usize = 13;

/// Errors that can occur when parsing an ISBN
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    #[error("ISBN must be exactly 13 digits, got {0}")]
    WrongLength(usize),

    #[error("ISBN must consist of only digits: {0:?}")]
    NonNumeric(String),
}

/// A validated 13-digit ISBN.
///
/// # Example
/// ```
/// use libris_core::Isbn;
///
/// let isbn = Isbn::parse("9780132350884").unwrap();
/// assert_eq!(isbn.as_str(), "9780132350884");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Parse an ISBN from its string form.
    ///
    /// Hyphens are not accepted; callers normalize before parsing.
    pub fn parse(value: &str) -> Result<Self, IsbnError> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IsbnError::NonNumeric(value.to_owned()));
        }
        if value.len() != ISBN_LEN {
            return Err(IsbnError::WrongLength(value.len()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Get the ISBN as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}
