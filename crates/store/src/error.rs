//! Store error types

use libris_core::{BookId, Isbn, PatronId};
use thiserror::Error;

/// Errors reported by a `RecordStore` backing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Book {0} not found in store")]
    BookNotFound(BookId),

    #[error("ISBN {0} is already cataloged")]
    DuplicateIsbn(Isbn),

    #[error(
        "Availability adjustment out of bounds for book {book}: \
         {available} adjusted by {delta} must stay within [0, {total}]"
    )]
    AvailabilityOutOfBounds {
        book: BookId,
        available: u32,
        total: u32,
        delta: i32,
    },

    #[error("No active loan for patron {patron} and book {book}")]
    NoActiveLoan { patron: PatronId, book: BookId },

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Backend failure with a free-form reason. Used by fallible backings
    /// and by test doubles that inject write failures.
    pub fn backend(reason: impl Into<String>) -> Self {
        StoreError::Backend(reason.into())
    }
}
