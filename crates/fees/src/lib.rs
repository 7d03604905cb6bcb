//! Libris Fees - Overdue fee arithmetic
//!
//! Two layers:
//! - `FeeSchedule`: the pure tiered schedule. Takes a loan and a reference
//!   time, returns a `FeeBreakdown`. No store access, no side effects.
//! - `assess_for_book`: the store-backed query used by circulation and
//!   payments. Resolves patron and book, finds the loan record, then
//!   delegates to the schedule. Failures are typed (`FeeQueryError`),
//!   never encoded as magic amounts.
//!
//! Fees are always derived on demand. Nothing here persists an amount.

pub mod query;
pub mod schedule;
pub mod types;

pub use query::{assess_for_book, FeeQueryError};
pub use schedule::{
    FeeSchedule, EXTENDED_DAILY_RATE, MAX_FEE, STANDARD_DAILY_RATE, STANDARD_TIER_DAYS,
};
pub use types::{FeeBreakdown, FeeStatus};
