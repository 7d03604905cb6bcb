//! Book - Catalog entries
//!
//! A `NewBook` is a validated request to add a title to the catalog. The
//! store mints a `BookId` on insert and the result circulates as a `Book`.

use crate::isbn::{Isbn, IsbnError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum title length after trimming
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum author length after trimming
pub const AUTHOR_MAX_LEN: usize = 100;

/// Errors that can occur when validating catalog input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be at most {max} characters (got {len})")]
    TitleTooLong { max: usize, len: usize },

    #[error("Author is required")]
    AuthorRequired,

    #[error("Author must be at most {max} characters (got {len})")]
    AuthorTooLong { max: usize, len: usize },

    #[error(transparent)]
    InvalidIsbn(#[from] IsbnError),

    #[error("Total copies must be greater than 0")]
    ZeroCopies,
}

/// Store-minted identifier for a catalog entry.
///
/// Ids are assigned sequentially on insert and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request to add a book to the catalog.
///
/// Checks run in field order: title, author, ISBN, copies. Title and author
/// are trimmed before the length checks, so whitespace-only input counts
/// as missing.
///
/// # Example
/// ```
/// use libris_core::NewBook;
///
/// let book = NewBook::new("  Clean Code ", "Robert C. Martin", "9780132350884", 3).unwrap();
/// assert_eq!(book.title, "Clean Code");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Isbn,
    pub total_copies: u32,
}

impl NewBook {
    pub fn new(
        title: &str,
        author: &str,
        isbn: &str,
        total_copies: u32,
    ) -> Result<Self, BookError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookError::TitleRequired);
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(BookError::TitleTooLong {
                max: TITLE_MAX_LEN,
                len: title.chars().count(),
            });
        }

        let author = author.trim();
        if author.is_empty() {
            return Err(BookError::AuthorRequired);
        }
        if author.chars().count() > AUTHOR_MAX_LEN {
            return Err(BookError::AuthorTooLong {
                max: AUTHOR_MAX_LEN,
                len: author.chars().count(),
            });
        }

        let isbn = Isbn::parse(isbn)?;

        if total_copies == 0 {
            return Err(BookError::ZeroCopies);
        }

        Ok(Self {
            title: title.to_owned(),
            author: author.to_owned(),
            isbn,
            total_copies,
        })
    }
}

/// A catalog entry as held by the store.
///
/// # Invariant
/// `available_copies <= total_copies` at all times. The store enforces this
/// on every availability adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: Isbn,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    /// True when at least one copy is on the shelf
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}
