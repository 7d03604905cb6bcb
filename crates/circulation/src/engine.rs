//! Circulation engine
//!
//! Orchestrates catalog and lending operations over an injected store and
//! clock. Operations validate first, then read, then write; the two-step
//! writes compensate the availability adjustment when the record step
//! fails, so a single failure never strands a reserved copy.

use crate::error::CirculationError;
use crate::policy::CirculationPolicy;
use crate::receipts::{BorrowReceipt, ReturnReceipt};
use crate::search::SearchKind;
use libris_core::{Book, BookId, Clock, Loan, NewBook, PatronId};
use libris_fees::{assess_for_book, FeeBreakdown, FeeQueryError, FeeSchedule};
use libris_store::{RecordStore, StoreError};
use std::str::FromStr;
use std::sync::Arc;

/// Business-rule layer for cataloging, borrowing and returning
pub struct CirculationEngine {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    policy: CirculationPolicy,
    schedule: FeeSchedule,
}

impl CirculationEngine {
    /// Engine with default policy and fee schedule
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(
            store,
            clock,
            CirculationPolicy::default(),
            FeeSchedule::default(),
        )
    }

    /// Engine with explicit policy and fee schedule
    pub fn with_config(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        policy: CirculationPolicy,
        schedule: FeeSchedule,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            schedule,
        }
    }

    pub fn policy(&self) -> &CirculationPolicy {
        &self.policy
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Add a title to the catalog.
    ///
    /// Input is validated in field order (title, author, ISBN, copies)
    /// before the duplicate-ISBN check; a rejected insert performs no
    /// store write. The new entry starts fully available.
    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        isbn: &str,
        total_copies: u32,
    ) -> Result<Book, CirculationError> {
        let new = NewBook::new(title, author, isbn, total_copies)?;

        // Duplicate check before the write
        if self.store.book_by_isbn(&new.isbn)?.is_some() {
            tracing::warn!(isbn = %new.isbn, "rejected catalog insert: ISBN already cataloged");
            return Err(CirculationError::IsbnAlreadyCataloged(new.isbn));
        }

        let id = self.store.insert_book(new.clone())?;
        tracing::debug!(book = %id, title = %new.title, copies = new.total_copies, "book cataloged");

        Ok(Book {
            id,
            title: new.title,
            author: new.author,
            isbn: new.isbn,
            total_copies: new.total_copies,
            available_copies: new.total_copies,
        })
    }

    /// Search the catalog.
    ///
    /// `kind` is one of `title`, `author`, `isbn`; anything else yields an
    /// empty result set rather than an error.
    pub fn search(&self, kind: &str, term: &str) -> Result<Vec<Book>, CirculationError> {
        match SearchKind::from_str(kind) {
            Ok(kind) => self.search_by(kind, term),
            Err(_) => {
                tracing::debug!(kind, "unrecognized search kind");
                Ok(Vec::new())
            }
        }
    }

    /// Search the catalog with a typed kind.
    ///
    /// Title and author match case-insensitively on the prefix; ISBN must
    /// match exactly. An empty prefix matches every entry.
    pub fn search_by(&self, kind: SearchKind, term: &str) -> Result<Vec<Book>, CirculationError> {
        let books = self.store.all_books()?;
        let matches: Vec<Book> = match kind {
            SearchKind::Title => {
                let needle = term.to_lowercase();
                books
                    .into_iter()
                    .filter(|b| b.title.to_lowercase().starts_with(&needle))
                    .collect()
            }
            SearchKind::Author => {
                let needle = term.to_lowercase();
                books
                    .into_iter()
                    .filter(|b| b.author.to_lowercase().starts_with(&needle))
                    .collect()
            }
            SearchKind::Isbn => books.into_iter().filter(|b| b.isbn.as_str() == term).collect(),
        };
        Ok(matches)
    }

    /// Borrow a book for a patron.
    ///
    /// Preconditions, in order: valid patron id, known book, copy on the
    /// shelf, no active loan for this (patron, book), borrowing limit not
    /// reached. The first failed check wins and nothing is written.
    pub fn borrow(&self, patron: &str, book: BookId) -> Result<BorrowReceipt, CirculationError> {
        // Validate patron id
        let patron = PatronId::parse(patron)?;

        // Resolve the book and verify a copy is on the shelf
        let entry = self
            .store
            .book(book)?
            .ok_or(CirculationError::BookNotFound(book))?;
        if !entry.is_available() {
            tracing::warn!(patron = %patron, book = %book, "rejected borrow: no copies available");
            return Err(CirculationError::unavailable(&entry.title));
        }

        // Lending rules
        let active = self.store.active_loans(&patron)?;
        if active.iter().any(|l| l.book == book) {
            tracing::warn!(patron = %patron, book = %book, "rejected borrow: already borrowed");
            return Err(CirculationError::already_borrowed(patron, &entry.title));
        }
        if active.len() >= self.policy.max_active_loans {
            tracing::warn!(
                patron = %patron,
                active = active.len(),
                max = self.policy.max_active_loans,
                "rejected borrow: loan limit reached"
            );
            return Err(CirculationError::BorrowLimitReached {
                patron,
                max: self.policy.max_active_loans,
            });
        }

        // Reserve the copy, then write the record; undo the reservation
        // if the record write fails
        self.store.adjust_availability(book, -1)?;
        let loan = Loan::open(
            patron.clone(),
            book,
            self.clock.now(),
            self.policy.loan_period(),
        );
        if let Err(cause) = self.store.insert_loan(&loan) {
            return Err(self.compensate(book, 1, "loan insert", cause));
        }

        tracing::debug!(
            patron = %patron,
            book = %book,
            due = %loan.due_at.format("%Y-%m-%d"),
            "book borrowed"
        );
        Ok(BorrowReceipt {
            patron,
            book,
            title: entry.title,
            borrowed_at: loan.borrowed_at,
            due_at: loan.due_at,
        })
    }

    /// Return a borrowed book.
    ///
    /// Requires an active loan for (patron, book). Releases the copy, then
    /// stamps the return date; a failed stamp takes the released copy back
    /// off the shelf.
    pub fn return_book(
        &self,
        patron: &str,
        book: BookId,
    ) -> Result<ReturnReceipt, CirculationError> {
        // Validate patron id
        let patron = PatronId::parse(patron)?;

        // Resolve the book and the active loan
        let entry = self
            .store
            .book(book)?
            .ok_or(CirculationError::BookNotFound(book))?;
        let has_active = self
            .store
            .active_loans(&patron)?
            .iter()
            .any(|l| l.book == book);
        if !has_active {
            tracing::warn!(patron = %patron, book = %book, "rejected return: not borrowed");
            return Err(CirculationError::not_borrowed(patron, &entry.title));
        }

        // Release the copy, then close the record; undo the release if
        // the stamp fails
        self.store.adjust_availability(book, 1)?;
        let returned_at = self.clock.now();
        if let Err(cause) = self.store.set_return_date(&patron, book, returned_at) {
            return Err(self.compensate(book, -1, "return stamp", cause));
        }

        tracing::debug!(
            patron = %patron,
            book = %book,
            returned = %returned_at.format("%Y-%m-%d"),
            "book returned"
        );
        Ok(ReturnReceipt {
            patron,
            book,
            title: entry.title,
            returned_at,
        })
    }

    /// Late fee currently owed by a patron on a book
    pub fn assess_late_fee(
        &self,
        patron: &str,
        book: BookId,
    ) -> Result<FeeBreakdown, FeeQueryError> {
        assess_for_book(
            self.store.as_ref(),
            &self.schedule,
            self.clock.as_ref(),
            patron,
            book,
        )
    }

    fn compensate(
        &self,
        book: BookId,
        delta: i32,
        step: &'static str,
        cause: StoreError,
    ) -> CirculationError {
        tracing::warn!(
            book = %book,
            step,
            error = %cause,
            "record step failed; compensating availability"
        );
        match self.store.adjust_availability(book, delta) {
            Ok(_) => CirculationError::Store(cause),
            Err(compensation) => {
                tracing::error!(
                    book = %book,
                    step,
                    error = %cause,
                    compensation = %compensation,
                    "availability compensation failed; store inconsistent"
                );
                CirculationError::StoreInconsistent {
                    book,
                    step,
                    cause: cause.to_string(),
                    compensation: compensation.to_string(),
                }
            }
        }
    }
}
