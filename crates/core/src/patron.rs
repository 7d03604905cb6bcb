//! PatronId - Validated library card number
//!
//! Every patron is identified by a 6-digit card number. Leading zeros are
//! significant, so the id is kept as a string, not an integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in a patron id
pub const PATRON_ID_LEN: usize = 6;

/// Errors that can occur when parsing a patron id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatronIdError {
    #[error("Invalid patron ID {0:?}. Must be exactly 6 digits.")]
    Malformed(String),
}

/// A validated 6-digit library card number.
///
/// # Invariant
/// The inner string is always exactly six ASCII digits. This is enforced by
/// the constructor.
///
/// # Example
/// ```
/// use libris_core::PatronId;
///
/// let patron = PatronId::parse("012345").unwrap();
/// assert_eq!(patron.as_str(), "012345");
///
/// // Anything that is not exactly six digits is rejected
/// assert!(PatronId::parse("12345").is_err());
/// assert!(PatronId::parse("12345a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatronId(String);

impl PatronId {
    /// Parse a patron id from its string form.
    ///
    /// Returns an error unless the input is exactly six ASCII digits.
    pub fn parse(value: &str) -> Result<Self, PatronIdError> {
        if value.len() == PATRON_ID_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_owned()))
        } else {
            Err(PatronIdError::Malformed(value.to_owned()))
        }
    }

    /// Get the card number as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatronId {
    type Err = PatronIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PatronId {
    type Error = PatronIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PatronId> for String {
    fn from(patron: PatronId) -> Self {
        patron.0
    }
}
