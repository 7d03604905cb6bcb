//! Circulation policy
//!
//! Loan period and borrowing limit are configurable via file; defaults are
//! the standard library policy.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default loan period in days
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Default ceiling on concurrently active loans per patron
pub const MAX_ACTIVE_LOANS: usize = 5;

/// Lending rules applied by the circulation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirculationPolicy {
    /// Days between borrowing and the due date
    #[serde(default = "default_loan_period_days")]
    pub loan_period_days: i64,

    /// Active loans a patron may hold at once
    #[serde(default = "default_max_active_loans")]
    pub max_active_loans: usize,
}

fn default_loan_period_days() -> i64 {
    LOAN_PERIOD_DAYS
}

fn default_max_active_loans() -> usize {
    MAX_ACTIVE_LOANS
}

impl Default for CirculationPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: default_loan_period_days(),
            max_active_loans: default_max_active_loans(),
        }
    }
}

impl CirculationPolicy {
    /// Load a policy from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Loan period as a chrono Duration
    pub fn loan_period(&self) -> Duration {
        Duration::days(self.loan_period_days)
    }
}
