//! Fee assessment results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a loan had passed its due date at assessment time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    NotOverdue,
    Overdue,
}

impl FeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStatus::NotOverdue => "not_overdue",
            FeeStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of pricing one loan at one instant.
///
/// Derived data: recomputed from the record and the reference time on every
/// query, never persisted. `days_overdue` counts whole days only, so a loan
/// overdue by part of a day reads `Overdue` with zero days and a zero amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub amount: Decimal,
    pub days_overdue: i64,
    pub status: FeeStatus,
}

impl FeeBreakdown {
    /// Breakdown for a loan at or before its due date
    pub fn none() -> Self {
        Self {
            amount: Decimal::new(0, 2),
            days_overdue: 0,
            status: FeeStatus::NotOverdue,
        }
    }

    /// True when there is an amount worth charging
    pub fn is_payable(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}
