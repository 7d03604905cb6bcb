//! Payment processor
//!
//! Reconciles the fee query with the payment gateway. The flow for a
//! charge: validate the patron, price the fee, refuse a zero balance,
//! resolve the title for the statement line, then make exactly one gateway
//! call. Refunds validate the token shape and amount bounds the same way.
//! Validation failures never reach the gateway.

use crate::error::PaymentError;
use crate::gateway::{ChargeOutcome, PaymentGateway, RefundOutcome, TransactionId};
use libris_core::{BookId, Clock, PatronId};
use libris_fees::{assess_for_book, FeeSchedule};
use libris_store::RecordStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a settled charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub patron: PatronId,
    pub book: BookId,
    pub transaction_id: TransactionId,
    pub amount: Decimal,
    pub days_overdue: i64,
    /// The gateway's confirmation text, propagated verbatim
    pub message: String,
}

/// Outcome of a settled refund
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundReceipt {
    pub transaction: TransactionId,
    pub amount: Decimal,
    pub message: String,
}

/// Settles late fees and refunds against an external gateway
pub struct PaymentProcessor {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    schedule: FeeSchedule,
}

impl PaymentProcessor {
    /// Processor with the default fee schedule
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_schedule(store, clock, FeeSchedule::default())
    }

    /// Processor with an explicit fee schedule
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

    /// Charge a patron's outstanding late fee for a book.
    ///
    /// The amount is whatever the fee query prices at call time; the
    /// gateway sees one charge request or none.
    pub fn charge_late_fees(
        &self,
        patron: &str,
        book: BookId,
        gateway: &dyn PaymentGateway,
    ) -> Result<PaymentReceipt, PaymentError> {
        // Validate the patron id before any pricing
        let patron = PatronId::parse(patron)?;

        // Price the fee; a query failure is reported, never charged
        let fee = assess_for_book(
            self.store.as_ref(),
            &self.schedule,
            self.clock.as_ref(),
            patron.as_str(),
            book,
        )?;
        if !fee.is_payable() {
            tracing::debug!(patron = %patron, book = %book, "nothing to charge");
            return Err(PaymentError::NoFeesOwed { patron, book });
        }

        // Resolve the title for the statement line
        let entry = self
            .store
            .book(book)?
            .ok_or(PaymentError::BookNotFound(book))?;
        let description = format!("Late fees for '{}'", entry.title);

        // Exactly one gateway call, never retried
        match gateway.charge(&patron, fee.amount, &description) {
            Ok(ChargeOutcome::Approved {
                transaction_id,
                message,
            }) => {
                tracing::debug!(
                    patron = %patron,
                    book = %book,
                    amount = %fee.amount,
                    transaction = %transaction_id,
                    "late fee charged"
                );
                Ok(PaymentReceipt {
                    patron,
                    book,
                    transaction_id,
                    amount: fee.amount,
                    days_overdue: fee.days_overdue,
                    message,
                })
            }
            Ok(ChargeOutcome::Declined { message }) => {
                tracing::warn!(patron = %patron, book = %book, reason = %message, "charge declined");
                Err(PaymentError::ChargeDeclined { message })
            }
            Err(cause) => {
                tracing::warn!(patron = %patron, book = %book, error = %cause, "charge failed in transport");
                Err(PaymentError::ChargeProcessing(cause))
            }
        }
    }

    /// Refund a previously settled late fee charge.
    ///
    /// The token must carry the `txn_` prefix and the amount must sit in
    /// `(0, max_fee]`; both are checked before the gateway sees anything,
    /// and the id and amount are forwarded untouched.
    pub fn refund_late_fees(
        &self,
        transaction: &str,
        amount: Decimal,
        gateway: &dyn PaymentGateway,
    ) -> Result<RefundReceipt, PaymentError> {
        // Validate token shape and amount bounds
        let transaction = TransactionId::parse(transaction)?;
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveRefund(amount));
        }
        if amount > self.schedule.max_fee {
            return Err(PaymentError::RefundExceedsMax {
                amount,
                max: self.schedule.max_fee,
            });
        }

        // Exactly one gateway call, never retried
        match gateway.refund(&transaction, amount) {
            Ok(RefundOutcome::Approved { message }) => {
                tracing::debug!(transaction = %transaction, amount = %amount, "late fee refunded");
                Ok(RefundReceipt {
                    transaction,
                    amount,
                    message,
                })
            }
            Ok(RefundOutcome::Declined { message }) => {
                tracing::warn!(transaction = %transaction, reason = %message, "refund declined");
                Err(PaymentError::RefundDeclined { message })
            }
            Err(cause) => {
                tracing::warn!(transaction = %transaction, error = %cause, "refund failed in transport");
                Err(PaymentError::RefundProcessing(cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGateway;
    use chrono::{TimeZone, Utc};
    use libris_core::{ManualClock, NewBook};
    use libris_store::MemoryStore;
    use rust_decimal_macros::dec;

    struct Fixture {
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
        processor: PaymentProcessor,
        book: BookId,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        ));
        let book = store
            .insert_book(NewBook::new("Dune", "Frank Herbert", "9780441172719", 2).unwrap())
            .unwrap();
        let processor = PaymentProcessor::new(store.clone(), clock.clone());
        Fixture {
            store,
            clock,
            processor,
            book,
        }
    }

    fn borrow(fx: &Fixture, patron: &str) {
        let loan = libris_core::Loan::open(
            PatronId::parse(patron).unwrap(),
            fx.book,
            fx.clock.now(),
            chrono::Duration::days(14),
        );
        fx.store.insert_loan(&loan).unwrap();
        fx.store.adjust_availability(fx.book, -1).unwrap();
    }

    #[test]
    fn test_charge_happy_path() {
        let fx = fixture();
        borrow(&fx, "123456");
        fx.clock.advance_days(24); // ten days late, 6.50

        let gateway = MockGateway::new();
        let receipt = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap();

        assert_eq!(receipt.amount, dec!(6.50));
        assert_eq!(receipt.days_overdue, 10);
        assert!(receipt.transaction_id.as_str().starts_with("txn_123456_"));

        // one call, with the amount and statement line we expect
        assert_eq!(gateway.charge_count(), 1);
        let request = &gateway.charges()[0];
        assert_eq!(request.amount, dec!(6.50));
        assert_eq!(request.description, "Late fees for 'Dune'");
    }

    #[test]
    fn test_charge_caps_at_max_fee() {
        let fx = fixture();
        borrow(&fx, "123456");
        fx.clock.advance_days(14 + 40);

        let gateway = MockGateway::new();
        let receipt = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap();
        assert_eq!(receipt.amount, dec!(15.00));
        assert_eq!(gateway.charges()[0].amount, dec!(15.00));
    }

    #[test]
    fn test_invalid_patron_never_reaches_gateway() {
        let fx = fixture();
        let gateway = MockGateway::new();
        let err = fx
            .processor
            .charge_late_fees("12ab56", fx.book, &gateway)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidPatronId(_)));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[test]
    fn test_fee_query_failure_never_reaches_gateway() {
        let fx = fixture();
        let gateway = MockGateway::new();
        // never borrowed: the fee query cannot price it
        let err = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap_err();
        assert!(matches!(err, PaymentError::FeeUnavailable(_)));
        assert!(err.to_string().contains("Unable to calculate late fees"));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[test]
    fn test_zero_fee_never_reaches_gateway() {
        let fx = fixture();
        borrow(&fx, "123456");
        fx.clock.advance_days(7); // well within the loan period

        let gateway = MockGateway::new();
        let err = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap_err();
        assert!(matches!(err, PaymentError::NoFeesOwed { .. }));
        assert!(err.to_string().contains("No late fees"));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[test]
    fn test_unknown_book_never_reaches_gateway() {
        let fx = fixture();
        let gateway = MockGateway::new();
        let err = fx
            .processor
            .charge_late_fees("123456", BookId(99), &gateway)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[test]
    fn test_declined_charge() {
        let fx = fixture();
        borrow(&fx, "123456");
        fx.clock.advance_days(24);

        let gateway = MockGateway::declining("insufficient funds");
        let err = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment failed: insufficient funds");
        assert_eq!(gateway.charge_count(), 1);
    }

    #[test]
    fn test_transport_failure_charge() {
        let fx = fixture();
        borrow(&fx, "123456");
        fx.clock.advance_days(24);

        let gateway = MockGateway::failing("connection reset");
        let err = fx
            .processor
            .charge_late_fees("123456", fx.book, &gateway)
            .unwrap_err();
        assert!(matches!(err, PaymentError::ChargeProcessing(_)));
        assert!(err.to_string().contains("Payment processing error"));
        assert_eq!(gateway.charge_count(), 1);
    }

    #[test]
    fn test_refund_happy_path_forwards_untouched() {
        let fx = fixture();
        let gateway = MockGateway::new();
        let receipt = fx
            .processor
            .refund_late_fees("txn_123456_cafe0123", dec!(6.50), &gateway)
            .unwrap();

        assert_eq!(receipt.amount, dec!(6.50));
        assert_eq!(gateway.refund_count(), 1);
        let request = &gateway.refunds()[0];
        assert_eq!(request.transaction.as_str(), "txn_123456_cafe0123");
        assert_eq!(request.amount, dec!(6.50));
    }

    #[test]
    fn test_refund_rejects_bad_token_shape() {
        let fx = fixture();
        let gateway = MockGateway::new();
        let err = fx
            .processor
            .refund_late_fees("payment_991", dec!(5.00), &gateway)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidTransactionId(_)));
        assert_eq!(gateway.refund_count(), 0);
    }

    #[test]
    fn test_refund_rejects_non_positive_amounts() {
        let fx = fixture();
        let gateway = MockGateway::new();
        for amount in [dec!(0.00), dec!(-3.00)] {
            let err = fx
                .processor
                .refund_late_fees("txn_x", amount, &gateway)
                .unwrap_err();
            assert!(err.to_string().contains("must be greater than 0"));
        }
        assert_eq!(gateway.refund_count(), 0);
    }

    #[test]
    fn test_refund_rejects_amount_over_cap() {
        let fx = fixture();
        let gateway = MockGateway::new();
        let err = fx
            .processor
            .refund_late_fees("txn_x", dec!(15.01), &gateway)
            .unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
        assert_eq!(gateway.refund_count(), 0);
    }

    #[test]
    fn test_refund_boundary_amounts_allowed() {
        let fx = fixture();
        let gateway = MockGateway::new();
        assert!(fx
            .processor
            .refund_late_fees("txn_x", dec!(0.01), &gateway)
            .is_ok());
        assert!(fx
            .processor
            .refund_late_fees("txn_x", dec!(15.00), &gateway)
            .is_ok());
        assert_eq!(gateway.refund_count(), 2);
    }

    #[test]
    fn test_refund_declined_and_transport() {
        let fx = fixture();

        let declining = MockGateway::declining("refund window closed");
        let err = fx
            .processor
            .refund_late_fees("txn_x", dec!(5.00), &declining)
            .unwrap_err();
        assert_eq!(err.to_string(), "Refund failed: refund window closed");

        let failing = MockGateway::failing("connection reset");
        let err = fx
            .processor
            .refund_late_fees("txn_x", dec!(5.00), &failing)
            .unwrap_err();
        assert!(err.to_string().contains("Refund processing error"));
    }
}
