//! Libris Core - Domain types
//!
//! This crate contains the fundamental types used across Libris:
//! - `PatronId`: Validated 6-digit library card number
//! - `Isbn`: Validated 13-digit book identifier
//! - `Book` / `BookId`: Catalog entries and their store-minted keys
//! - `Loan`: A borrow record and its active/returned lifecycle
//! - `Clock`: Injected time capability for deterministic fee arithmetic

pub mod book;
pub mod clock;
pub mod isbn;
pub mod loan;
pub mod patron;

pub use book::{Book, BookError, BookId, NewBook, AUTHOR_MAX_LEN, TITLE_MAX_LEN};
pub use clock::{Clock, ManualClock, SystemClock};
pub use isbn::{Isbn, IsbnError, ISBN_LEN};
pub use loan::{Loan, LoanStatus};
pub use patron::{PatronId, PatronIdError, PATRON_ID_LEN};
