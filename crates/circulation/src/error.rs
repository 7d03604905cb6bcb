//! Circulation errors

use libris_core::{BookError, BookId, Isbn, PatronId, PatronIdError};
use libris_store::StoreError;
use thiserror::Error;

/// Errors reported by the circulation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    // === Validation errors ===
    #[error(transparent)]
    InvalidPatronId(#[from] PatronIdError),

    #[error(transparent)]
    InvalidBook(#[from] BookError),

    // === Rule violations ===
    #[error("A book with ISBN {0} already exists")]
    IsbnAlreadyCataloged(Isbn),

    #[error("\"{title}\" is not available")]
    BookUnavailable { title: String },

    #[error("Patron {patron} has already borrowed \"{title}\"")]
    AlreadyBorrowed { patron: PatronId, title: String },

    #[error("Patron {patron} has reached the maximum borrowing limit of {max} books")]
    BorrowLimitReached { patron: PatronId, max: usize },

    #[error("\"{title}\" is not borrowed by patron {patron}")]
    NotBorrowed { patron: PatronId, title: String },

    // === Not found errors ===
    #[error("Book {0} not found")]
    BookNotFound(BookId),

    // === Wrapped errors ===
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(
        "Store inconsistent for book {book}: {step} failed ({cause}) \
         and the availability compensation failed ({compensation})"
    )]
    StoreInconsistent {
        book: BookId,
        step: &'static str,
        cause: String,
        compensation: String,
    },
}

impl CirculationError {
    /// Create a book-unavailable error
    pub fn unavailable(title: &str) -> Self {
        Self::BookUnavailable {
            title: title.to_string(),
        }
    }

    /// Create an already-borrowed error
    pub fn already_borrowed(patron: PatronId, title: &str) -> Self {
        Self::AlreadyBorrowed {
            patron,
            title: title.to_string(),
        }
    }

    /// Create a not-borrowed error
    pub fn not_borrowed(patron: PatronId, title: &str) -> Self {
        Self::NotBorrowed {
            patron,
            title: title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message() {
        let err = CirculationError::unavailable("Dune");
        assert!(err.to_string().contains("\"Dune\" is not available"));
    }

    #[test]
    fn test_already_borrowed_message() {
        let patron = PatronId::parse("123456").unwrap();
        let err = CirculationError::already_borrowed(patron, "Dune");
        assert!(err.to_string().contains("already borrowed"));
        assert!(err.to_string().contains("123456"));
    }

    #[test]
    fn test_limit_message_names_the_limit() {
        let err = CirculationError::BorrowLimitReached {
            patron: PatronId::parse("123456").unwrap(),
            max: 5,
        };
        assert!(err.to_string().contains("maximum borrowing limit of 5"));
    }

    #[test]
    fn test_patron_error_passes_through() {
        let err: CirculationError = PatronId::parse("12").unwrap_err().into();
        assert!(err.to_string().contains("Invalid patron ID"));
        assert!(err.to_string().contains("6 digits"));
    }
}
