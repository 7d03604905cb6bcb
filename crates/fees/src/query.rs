//! Store-backed fee query
//!
//! Resolves the inputs a fee question arrives with (a raw patron string and
//! a book id) against the record store, then prices the loan with the pure
//! schedule. Error conditions are typed; callers can always tell "no fee"
//! from "could not answer".

use crate::schedule::FeeSchedule;
use crate::types::FeeBreakdown;
use libris_core::{BookId, Clock, PatronId, PatronIdError};
use libris_store::{RecordStore, StoreError};
use thiserror::Error;

/// Why a fee query could not produce a breakdown
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeQueryError {
    #[error(transparent)]
    InvalidPatronId(#[from] PatronIdError),

    #[error("Book {0} not found")]
    BookNotFound(BookId),

    #[error("Book {book} was never borrowed by patron {patron}")]
    NeverBorrowed { patron: PatronId, book: BookId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Price the late fee a patron owes on a book.
///
/// Looks up the patron's earliest loan record for the book and assesses it
/// at `clock.now()`. A returned record keeps pricing by its return date, so
/// an unpaid fee stays payable after the book is back on the shelf.
pub fn assess_for_book(
    store: &dyn RecordStore,
    schedule: &FeeSchedule,
    clock: &dyn Clock,
    patron: &str,
    book: BookId,
) -> Result<FeeBreakdown, FeeQueryError> {
    let patron = PatronId::parse(patron)?;
    let entry = store.book(book)?.ok_or(FeeQueryError::BookNotFound(book))?;
    let history = store.loan_history(&patron)?;
    let loan = history
        .iter()
        .find(|l| l.book == book)
        .ok_or_else(|| FeeQueryError::NeverBorrowed {
            patron: patron.clone(),
            book,
        })?;
    let breakdown = schedule.assess(loan, clock.now());
    tracing::debug!(
        patron = %patron,
        book = %book,
        title = %entry.title,
        amount = %breakdown.amount,
        days_overdue = breakdown.days_overdue,
        "late fee assessed"
    );
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeeStatus;
    use chrono::{Duration, TimeZone, Utc};
    use libris_core::{Loan, ManualClock, NewBook};
    use libris_store::MemoryStore;
    use rust_decimal_macros::dec;

    fn seeded() -> (MemoryStore, BookId, ManualClock) {
        let store = MemoryStore::new();
        let id = store
            .insert_book(
                NewBook::new("The Pragmatic Programmer", "Hunt & Thomas", "9780201616224", 2)
                    .unwrap(),
            )
            .unwrap();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        (store, id, clock)
    }

    fn open_loan(store: &MemoryStore, id: BookId, clock: &ManualClock) {
        let loan = Loan::open(
            PatronId::parse("123456").unwrap(),
            id,
            clock.now(),
            Duration::days(14),
        );
        store.insert_loan(&loan).unwrap();
    }

    #[test]
    fn test_invalid_patron_is_typed() {
        let (store, id, clock) = seeded();
        let err = assess_for_book(&store, &FeeSchedule::default(), &clock, "12x", id).unwrap_err();
        assert!(matches!(err, FeeQueryError::InvalidPatronId(_)));
        assert!(err.to_string().contains("Invalid patron ID"));
    }

    #[test]
    fn test_unknown_book_is_typed() {
        let (store, _, clock) = seeded();
        let err = assess_for_book(
            &store,
            &FeeSchedule::default(),
            &clock,
            "123456",
            BookId(99),
        )
        .unwrap_err();
        assert_eq!(err, FeeQueryError::BookNotFound(BookId(99)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_never_borrowed_is_typed() {
        let (store, id, clock) = seeded();
        let err =
            assess_for_book(&store, &FeeSchedule::default(), &clock, "123456", id).unwrap_err();
        assert!(matches!(err, FeeQueryError::NeverBorrowed { .. }));
    }

    #[test]
    fn test_active_loan_priced_at_clock_now() {
        let (store, id, clock) = seeded();
        open_loan(&store, id, &clock);

        clock.advance_days(24); // ten days past the 14-day period
        let b = assess_for_book(&store, &FeeSchedule::default(), &clock, "123456", id).unwrap();
        assert_eq!(b.amount, dec!(6.50));
        assert_eq!(b.days_overdue, 10);
        assert_eq!(b.status, FeeStatus::Overdue);
    }

    #[test]
    fn test_returned_loan_keeps_owing_after_return() {
        let (store, id, clock) = seeded();
        open_loan(&store, id, &clock);

        clock.advance_days(18); // four days late
        let patron = PatronId::parse("123456").unwrap();
        store.set_return_date(&patron, id, clock.now()).unwrap();

        clock.advance_days(100);
        let b = assess_for_book(&store, &FeeSchedule::default(), &clock, "123456", id).unwrap();
        assert_eq!(b.amount, dec!(2.00));
        assert_eq!(b.days_overdue, 4);
    }

    #[test]
    fn test_on_time_active_loan_owes_nothing() {
        let (store, id, clock) = seeded();
        open_loan(&store, id, &clock);

        clock.advance_days(7);
        let b = assess_for_book(&store, &FeeSchedule::default(), &clock, "123456", id).unwrap();
        assert_eq!(b.amount, dec!(0.00));
        assert_eq!(b.status, FeeStatus::NotOverdue);
    }
}
