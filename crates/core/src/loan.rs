//! Loan - Borrow records
//!
//! A loan is opened when a patron borrows a book and closed when the book
//! comes back. Closed loans stay in the store; fee queries and status
//! reports read them as history.

use crate::book::BookId;
use crate::patron::PatronId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(LoanStatus::Active),
            "returned" => Some(LoanStatus::Returned),
            _ => None,
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrow record.
///
/// `due_at` is fixed at open time and never moves. `returned_at` is `None`
/// while the loan is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub patron: PatronId,
    pub book: BookId,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Open a loan at `borrowed_at` with the given loan period.
    pub fn open(
        patron: PatronId,
        book: BookId,
        borrowed_at: DateTime<Utc>,
        loan_period: Duration,
    ) -> Self {
        Self {
            patron,
            book,
            borrowed_at,
            due_at: borrowed_at + loan_period,
            returned_at: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_active() {
            LoanStatus::Active
        } else {
            LoanStatus::Returned
        }
    }

    /// The instant fee arithmetic measures against: the return time for a
    /// closed loan, `as_of` for an active one.
    pub fn effective_end(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        self.returned_at.unwrap_or(as_of)
    }

    /// True when the effective end falls after the due date
    pub fn is_overdue(&self, as_of: DateTime<Utc>) -> bool {
        self.effective_end(as_of) > self.due_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn patron() -> PatronId {
        PatronId::parse("123456").unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_open_sets_due_date() {
        let loan = Loan::open(patron(), BookId(1), at(2024, 3, 1), Duration::days(14));
        assert_eq!(loan.due_at, at(2024, 3, 15));
        assert!(loan.is_active());
        assert_eq!(loan.status(), LoanStatus::Active);
    }

    #[test]
    fn test_effective_end_prefers_return_date() {
        let mut loan = Loan::open(patron(), BookId(1), at(2024, 3, 1), Duration::days(14));
        loan.returned_at = Some(at(2024, 3, 10));
        assert_eq!(loan.effective_end(at(2024, 4, 1)), at(2024, 3, 10));
        assert_eq!(loan.status(), LoanStatus::Returned);
    }

    #[test]
    fn test_active_loan_measures_against_as_of() {
        let loan = Loan::open(patron(), BookId(1), at(2024, 3, 1), Duration::days(14));
        assert_eq!(loan.effective_end(at(2024, 4, 1)), at(2024, 4, 1));
        assert!(loan.is_overdue(at(2024, 4, 1)));
        assert!(!loan.is_overdue(at(2024, 3, 15)));
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(LoanStatus::from_str("active"), Some(LoanStatus::Active));
        assert_eq!(LoanStatus::from_str("returned"), Some(LoanStatus::Returned));
        assert_eq!(LoanStatus::from_str("lost"), None);
        assert_eq!(LoanStatus::Active.to_string(), "active");
    }
}
