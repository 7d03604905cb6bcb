//! Tiered overdue fee schedule
//!
//! The rates are configurable via file, not hardcoded into the arithmetic.
//! Defaults reproduce the standard library policy: 0.50/day for the first
//! week overdue, 1.00/day after that, never more than 15.00 per loan.

use crate::types::{FeeBreakdown, FeeStatus};
use chrono::{DateTime, Utc};
use libris_core::Loan;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily rate for the standard tier
pub const STANDARD_DAILY_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 2); // 0.50

/// Daily rate beyond the standard tier
pub const EXTENDED_DAILY_RATE: Decimal = Decimal::from_parts(100, 0, 0, false, 2); // 1.00

/// Ceiling per loan
pub const MAX_FEE: Decimal = Decimal::from_parts(1500, 0, 0, false, 2); // 15.00

/// Length of the standard tier in whole days
pub const STANDARD_TIER_DAYS: i64 = 7;

/// Overdue fee configuration.
///
/// All fields can be overridden via config file; missing fields fall back
/// to the defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Per-day rate for the first `standard_tier_days` overdue days
    #[serde(default = "default_standard_daily_rate")]
    pub standard_daily_rate: Decimal,

    /// Per-day rate for every overdue day past the standard tier
    #[serde(default = "default_extended_daily_rate")]
    pub extended_daily_rate: Decimal,

    /// Number of whole days billed at the standard rate
    #[serde(default = "default_standard_tier_days")]
    pub standard_tier_days: i64,

    /// Hard ceiling on the fee for a single loan
    #[serde(default = "default_max_fee")]
    pub max_fee: Decimal,
}

fn default_standard_daily_rate() -> Decimal {
    STANDARD_DAILY_RATE
}

fn default_extended_daily_rate() -> Decimal {
    EXTENDED_DAILY_RATE
}

fn default_standard_tier_days() -> i64 {
    STANDARD_TIER_DAYS
}

fn default_max_fee() -> Decimal {
    MAX_FEE
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            standard_daily_rate: default_standard_daily_rate(),
            extended_daily_rate: default_extended_daily_rate(),
            standard_tier_days: default_standard_tier_days(),
            max_fee: default_max_fee(),
        }
    }
}

impl FeeSchedule {
    /// Load a schedule from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Price a loan at `as_of`.
    ///
    /// The effective end is the return date for a closed loan, `as_of` for
    /// an active one. At or before the due date the breakdown is zero and
    /// `NotOverdue`. Past it, whole days are billed through the tiers;
    /// partial days never round up.
    pub fn assess(&self, loan: &Loan, as_of: DateTime<Utc>) -> FeeBreakdown {
        let end = loan.effective_end(as_of);
        if end <= loan.due_at {
            return FeeBreakdown::none();
        }
        let days_overdue = (end - loan.due_at).num_days();
        FeeBreakdown {
            amount: self.fee_for_days(days_overdue),
            days_overdue,
            status: FeeStatus::Overdue,
        }
    }

    /// Fee for a whole number of overdue days, capped at `max_fee`
    pub fn fee_for_days(&self, days_overdue: i64) -> Decimal {
        if days_overdue <= 0 {
            return Decimal::new(0, 2);
        }
        let standard_days = days_overdue.min(self.standard_tier_days);
        let extended_days = days_overdue - standard_days;
        let raw = self.standard_daily_rate * Decimal::from(standard_days)
            + self.extended_daily_rate * Decimal::from(extended_days);
        raw.min(self.max_fee).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use libris_core::{BookId, PatronId};
    use rust_decimal_macros::dec;

    fn loan_due(due_day: u32) -> Loan {
        let borrowed = Utc.with_ymd_and_hms(2024, 3, due_day, 12, 0, 0).unwrap()
            - Duration::days(14);
        Loan::open(
            PatronId::parse("123456").unwrap(),
            BookId(1),
            borrowed,
            Duration::days(14),
        )
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_default_matches_constants() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.standard_daily_rate, dec!(0.50));
        assert_eq!(schedule.extended_daily_rate, dec!(1.00));
        assert_eq!(schedule.standard_tier_days, 7);
        assert_eq!(schedule.max_fee, dec!(15.00));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "max_fee": "20.00" }"#;
        let schedule: FeeSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.max_fee, dec!(20.00));
        assert_eq!(schedule.standard_daily_rate, dec!(0.50)); // default
    }

    #[test]
    fn test_on_time_is_not_overdue() {
        let schedule = FeeSchedule::default();
        let loan = loan_due(15);
        let b = schedule.assess(&loan, at(10, 12));
        assert_eq!(b, FeeBreakdown::none());
    }

    #[test]
    fn test_due_instant_is_not_overdue() {
        let schedule = FeeSchedule::default();
        let loan = loan_due(15);
        let b = schedule.assess(&loan, loan.due_at);
        assert_eq!(b.status, FeeStatus::NotOverdue);
        assert_eq!(b.amount, dec!(0.00));
    }

    #[test]
    fn test_partial_day_overdue_is_free_but_flagged() {
        let schedule = FeeSchedule::default();
        let loan = loan_due(15);
        // six hours past due: overdue, zero whole days, zero fee
        let b = schedule.assess(&loan, at(15, 18));
        assert_eq!(b.status, FeeStatus::Overdue);
        assert_eq!(b.days_overdue, 0);
        assert_eq!(b.amount, dec!(0.00));
    }

    #[test]
    fn test_standard_tier_points() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.fee_for_days(1), dec!(0.50));
        assert_eq!(schedule.fee_for_days(3), dec!(1.50));
        assert_eq!(schedule.fee_for_days(7), dec!(3.50));
    }

    #[test]
    fn test_extended_tier_points() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.fee_for_days(8), dec!(4.50));
        assert_eq!(schedule.fee_for_days(10), dec!(6.50));
        assert_eq!(schedule.fee_for_days(14), dec!(10.50));
    }

    #[test]
    fn test_cap_applies() {
        let schedule = FeeSchedule::default();
        // 3.50 + 12 * 1.00 = 15.50, capped
        assert_eq!(schedule.fee_for_days(19), dec!(15.00));
        assert_eq!(schedule.fee_for_days(20), dec!(15.00));
        assert_eq!(schedule.fee_for_days(365), dec!(15.00));
    }

    #[test]
    fn test_fee_is_monotonic_in_days() {
        let schedule = FeeSchedule::default();
        let mut previous = dec!(0.00);
        for days in 0..=40 {
            let fee = schedule.fee_for_days(days);
            assert!(fee >= previous, "fee dropped at {days} days");
            assert!(fee <= schedule.max_fee);
            previous = fee;
        }
    }

    #[test]
    fn test_returned_loan_priced_by_return_date() {
        let schedule = FeeSchedule::default();
        let mut loan = loan_due(15);
        loan.returned_at = Some(loan.due_at + Duration::days(10));
        // reference time long after the return plays no part
        let b = schedule.assess(&loan, loan.due_at + Duration::days(500));
        assert_eq!(b.amount, dec!(6.50));
        assert_eq!(b.days_overdue, 10);
    }

    #[test]
    fn test_active_loan_priced_by_reference_time() {
        let schedule = FeeSchedule::default();
        let loan = loan_due(15);
        let b = schedule.assess(&loan, loan.due_at + Duration::days(20));
        assert_eq!(b.amount, dec!(15.00));
        assert_eq!(b.days_overdue, 20);
        assert_eq!(b.status, FeeStatus::Overdue);
    }
}
