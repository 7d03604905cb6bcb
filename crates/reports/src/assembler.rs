//! Builds patron status reports from the record store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use libris_core::{BookId, Clock, LoanStatus, PatronId};
use libris_fees::{FeeBreakdown, FeeSchedule};
use libris_store::{RecordStore, StoreError};

use crate::exporters::ReportData;

/// One row of a patron's loan history, priced as of report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanLine {
    pub book: BookId,
    pub title: String,
    pub status: LoanStatus,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub fee: FeeBreakdown,
}

/// Full circulation status for one patron.
///
/// `books_borrowed` counts only active loans; `lines` covers the whole
/// loan history, returned records included. `total_fees` sums the fee
/// of every line, so a patron holding several overdue books can owe
/// more than the per-loan cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronStatusReport {
    pub title: String,
    pub patron: String,
    pub books_borrowed: usize,
    pub lines: Vec<LoanLine>,
    pub total_fees: Decimal,
    pub generated_at: DateTime<Utc>,
}

impl PatronStatusReport {
    /// Report for a patron the system knows nothing about, including
    /// one whose id never parsed. Carries the raw input so the header
    /// still says who was asked for.
    pub fn empty(patron: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: format!("Patron Status: {patron}"),
            patron: patron.to_string(),
            books_borrowed: 0,
            lines: Vec::new(),
            total_fees: Decimal::new(0, 2),
            generated_at,
        }
    }

    pub fn owes_fees(&self) -> bool {
        self.total_fees > Decimal::ZERO
    }
}

impl ReportData for PatronStatusReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        [
            "Book ID",
            "Title",
            "Status",
            "Borrowed",
            "Due",
            "Returned",
            "Days Overdue",
            "Fee",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.lines
            .iter()
            .map(|line| {
                vec![
                    line.book.to_string(),
                    line.title.clone(),
                    line.status.to_string(),
                    line.borrowed_at.format("%Y-%m-%d").to_string(),
                    line.due_at.format("%Y-%m-%d").to_string(),
                    line.returned_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    line.fee.days_overdue.to_string(),
                    line.fee.amount.to_string(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Patron".to_string(), self.patron.clone()),
            (
                "Books Borrowed".to_string(),
                self.books_borrowed.to_string(),
            ),
            ("Total Fees".to_string(), self.total_fees.to_string()),
            (
                "Generated At".to_string(),
                self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        ]
    }
}

/// Assembles patron status reports.
///
/// Every history record is priced individually against the schedule,
/// so two loans of the same book each carry the fee their own dates
/// earned.
pub struct ReportAssembler {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    schedule: FeeSchedule,
}

impl ReportAssembler {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_schedule(store, clock, FeeSchedule::default())
    }

    pub fn with_schedule(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        schedule: FeeSchedule,
    ) -> Self {
        Self {
            store,
            clock,
            schedule,
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Builds the status report for one patron.
    ///
    /// A malformed patron id yields the empty report rather than an
    /// error; the desk prints "nothing on file" either way. Store
    /// failures do propagate.
    pub fn patron_status(&self, patron: &str) -> Result<PatronStatusReport, StoreError> {
        let now = self.clock.now();

        let patron_id = match PatronId::parse(patron) {
            Ok(id) => id,
            Err(_) => {
                tracing::debug!(patron = %patron, "status report requested for malformed patron id");
                return Ok(PatronStatusReport::empty(patron, now));
            }
        };

        let mut report = PatronStatusReport::empty(patron_id.as_str(), now);
        report.books_borrowed = self.store.active_loan_count(&patron_id)?;

        for loan in self.store.loan_history(&patron_id)? {
            let title = self
                .store
                .book(loan.book)?
                .map(|b| b.title)
                .unwrap_or_else(|| "(unknown)".to_string());
            let fee: FeeBreakdown = self.schedule.assess(&loan, now);
            report.total_fees += fee.amount;
            report.lines.push(LoanLine {
                book: loan.book,
                title,
                status: loan.status(),
                borrowed_at: loan.borrowed_at,
                due_at: loan.due_at,
                returned_at: loan.returned_at,
                fee,
            });
        }

        tracing::debug!(
            patron = %patron_id,
            books_borrowed = report.books_borrowed,
            lines = report.lines.len(),
            total_fees = %report.total_fees,
            "assembled patron status report"
        );
        Ok(report)
    }
}
