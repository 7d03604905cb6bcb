//! Payment errors

use crate::gateway::{GatewayError, TransactionIdError};
use libris_core::{BookId, PatronId, PatronIdError};
use libris_fees::FeeQueryError;
use libris_store::StoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors reported by the payment processor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    // === Validation errors ===
    #[error(transparent)]
    InvalidPatronId(#[from] PatronIdError),

    #[error(transparent)]
    InvalidTransactionId(#[from] TransactionIdError),

    #[error("Refund amount must be greater than 0 (got {0})")]
    NonPositiveRefund(Decimal),

    #[error("Refund amount {amount} exceeds maximum late fee of {max}")]
    RefundExceedsMax { amount: Decimal, max: Decimal },

    // === Fee resolution ===
    #[error("Unable to calculate late fees: {0}")]
    FeeUnavailable(#[from] FeeQueryError),

    #[error("No late fees owed by patron {patron} for book {book}")]
    NoFeesOwed { patron: PatronId, book: BookId },

    // === Not found errors ===
    #[error("Book {0} not found")]
    BookNotFound(BookId),

    // === Gateway outcomes ===
    #[error("Payment failed: {message}")]
    ChargeDeclined { message: String },

    #[error("Payment processing error: {0}")]
    ChargeProcessing(GatewayError),

    #[error("Refund failed: {message}")]
    RefundDeclined { message: String },

    #[error("Refund processing error: {0}")]
    RefundProcessing(GatewayError),

    // === Wrapped errors ===
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
