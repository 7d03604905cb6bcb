//! # Libris Demos
//!
//! Runnable scenarios walking through the circulation workflow end to end.
//!
//! ## Available Examples
//!
//! 1. **01_circulation_desk** - Cataloging, search, borrow and return at the desk
//! 2. **02_overdue_settlement** - Overdue fees, card payment, refund and the status report
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run -p libris-demos --example 01_circulation_desk
//! cargo run -p libris-demos --example 02_overdue_settlement
//! ```

// This crate only contains examples, no library code.
