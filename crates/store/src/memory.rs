//! In-memory record store
//!
//! Backs tests and demos. State lives behind a single `RwLock`; book ids
//! are minted sequentially starting at 1 and never reused.

use crate::error::StoreError;
use crate::types::RecordStore;
use chrono::{DateTime, Utc};
use libris_core::{Book, BookId, Isbn, Loan, NewBook, PatronId};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    books: BTreeMap<BookId, Book>,
    loans: Vec<Loan>,
    next_book_id: u64,
}

/// `RwLock`-guarded in-memory implementation of `RecordStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert_book(&self, new: NewBook) -> Result<BookId, StoreError> {
        let mut state = self.state.write().unwrap();
        if state.books.values().any(|b| b.isbn == new.isbn) {
            return Err(StoreError::DuplicateIsbn(new.isbn));
        }
        state.next_book_id += 1;
        let id = BookId(state.next_book_id);
        state.books.insert(
            id,
            Book {
                id,
                title: new.title,
                author: new.author,
                isbn: new.isbn,
                total_copies: new.total_copies,
                available_copies: new.total_copies,
            },
        );
        Ok(id)
    }

    fn book(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.state.read().unwrap().books.get(&id).cloned())
    }

    fn book_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, StoreError> {
        let state = self.state.read().unwrap();
        Ok(state.books.values().find(|b| &b.isbn == isbn).cloned())
    }

    fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.state.read().unwrap().books.values().cloned().collect())
    }

    fn adjust_availability(&self, id: BookId, delta: i32) -> Result<u32, StoreError> {
        let mut state = self.state.write().unwrap();
        let book = state
            .books
            .get_mut(&id)
            .ok_or(StoreError::BookNotFound(id))?;
        let adjusted = i64::from(book.available_copies) + i64::from(delta);
        if adjusted < 0 || adjusted > i64::from(book.total_copies) {
            return Err(StoreError::AvailabilityOutOfBounds {
                book: id,
                available: book.available_copies,
                total: book.total_copies,
                delta,
            });
        }
        book.available_copies = adjusted as u32;
        Ok(book.available_copies)
    }

    fn insert_loan(&self, loan: &Loan) -> Result<(), StoreError> {
        self.state.write().unwrap().loans.push(loan.clone());
        Ok(())
    }

    fn set_return_date(
        &self,
        patron: &PatronId,
        book: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<Loan, StoreError> {
        let mut state = self.state.write().unwrap();
        let record = state
            .loans
            .iter_mut()
            .find(|l| &l.patron == patron && l.book == book && l.is_active())
            .ok_or_else(|| StoreError::NoActiveLoan {
                patron: patron.clone(),
                book,
            })?;
        record.returned_at = Some(returned_at);
        Ok(record.clone())
    }

    fn active_loan_count(&self, patron: &PatronId) -> Result<usize, StoreError> {
        let state = self.state.read().unwrap();
        Ok(state
            .loans
            .iter()
            .filter(|l| &l.patron == patron && l.is_active())
            .count())
    }

    fn active_loans(&self, patron: &PatronId) -> Result<Vec<Loan>, StoreError> {
        let state = self.state.read().unwrap();
        Ok(state
            .loans
            .iter()
            .filter(|l| &l.patron == patron && l.is_active())
            .cloned()
            .collect())
    }

    fn loan_history(&self, patron: &PatronId) -> Result<Vec<Loan>, StoreError> {
        let state = self.state.read().unwrap();
        Ok(state
            .loans
            .iter()
            .filter(|l| &l.patron == patron)
            .cloned()
            .collect())
    }
}
