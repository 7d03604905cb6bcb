//! Libris Circulation - Borrow/return lifecycle
//!
//! `CirculationEngine` owns the business rules of lending:
//! - catalog management: validated inserts, duplicate-ISBN rejection
//! - catalog search: title/author prefix, exact ISBN
//! - borrowing: availability, double-borrow and loan-limit gatekeeping
//! - returning: active-record requirement, return-date stamping
//! - late-fee passthrough to the fee query
//!
//! Every mutation validates first; a rejected operation leaves the store
//! untouched. The two-step writes (availability + record) compensate the
//! availability step when the record step fails.

pub mod engine;
pub mod error;
pub mod policy;
pub mod receipts;
pub mod search;

pub use engine::CirculationEngine;
pub use error::CirculationError;
pub use policy::{CirculationPolicy, LOAN_PERIOD_DAYS, MAX_ACTIVE_LOANS};
pub use receipts::{BorrowReceipt, ReturnReceipt};
pub use search::SearchKind;
