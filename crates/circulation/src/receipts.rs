//! Operation receipts
//!
//! Successful borrow/return operations hand back a receipt whose `Display`
//! is the confirmation line shown to patrons.

use chrono::{DateTime, Utc};
use libris_core::{BookId, PatronId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a successful borrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowReceipt {
    pub patron: PatronId,
    pub book: BookId,
    pub title: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}

impl fmt::Display for BorrowReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully borrowed \"{}\". Due date: {}.",
            self.title,
            self.due_at.format("%Y-%m-%d")
        )
    }
}

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub patron: PatronId,
    pub book: BookId,
    pub title: String,
    pub returned_at: DateTime<Utc>,
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully returned \"{}\". Return date: {}.",
            self.title,
            self.returned_at.format("%Y-%m-%d")
        )
    }
}
