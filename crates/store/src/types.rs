//! RecordStore trait

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use libris_core::{Book, BookId, Isbn, Loan, NewBook, PatronId};

/// Synchronous access to catalog entries and loan records.
///
/// All operations are blocking. Implementations must be shareable across
/// threads; per-operation consistency is the implementation's concern, but
/// no cross-operation transaction is assumed by callers.
pub trait RecordStore: Send + Sync {
    /// Insert a validated catalog entry and mint its id.
    ///
    /// The stored entry starts with `available_copies == total_copies`.
    /// Fails with `DuplicateIsbn` when the ISBN is already cataloged.
    fn insert_book(&self, new: NewBook) -> Result<BookId, StoreError>;

    /// Fetch a catalog entry by id
    fn book(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Fetch a catalog entry by ISBN
    fn book_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, StoreError>;

    /// All catalog entries, in id order
    fn all_books(&self) -> Result<Vec<Book>, StoreError>;

    /// Apply a signed delta to `available_copies`, returning the new count.
    ///
    /// A delta that would leave `[0, total_copies]` fails with
    /// `AvailabilityOutOfBounds` and changes nothing.
    fn adjust_availability(&self, id: BookId, delta: i32) -> Result<u32, StoreError>;

    /// Append a loan record
    fn insert_loan(&self, loan: &Loan) -> Result<(), StoreError>;

    /// Stamp the return date on the active loan for (patron, book).
    ///
    /// Only an active record is eligible; fails with `NoActiveLoan` when
    /// none exists. Returns the closed record.
    fn set_return_date(
        &self,
        patron: &PatronId,
        book: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<Loan, StoreError>;

    /// Number of active loans held by a patron
    fn active_loan_count(&self, patron: &PatronId) -> Result<usize, StoreError>;

    /// Active loans held by a patron, in insertion order
    fn active_loans(&self, patron: &PatronId) -> Result<Vec<Loan>, StoreError>;

    /// Every loan record for a patron, active and returned, in insertion order
    fn loan_history(&self, patron: &PatronId) -> Result<Vec<Loan>, StoreError>;
}
