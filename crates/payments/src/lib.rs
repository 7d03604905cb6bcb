//! Libris Payments - Fee settlement through an external gateway
//!
//! `PaymentProcessor` reconciles what a patron owes (priced by the fee
//! query) with an external `PaymentGateway`. The gateway is never touched
//! until every validation has passed, and a single operation performs at
//! most one gateway call; declines and transport failures surface as typed
//! errors, never retries.
//!
//! `MockGateway` is the bundled gateway double: configurable outcome,
//! recorded requests, minted transaction ids.

pub mod error;
pub mod gateway;
pub mod mock;
pub mod processor;

pub use error::PaymentError;
pub use gateway::{
    ChargeOutcome, GatewayError, PaymentGateway, RefundOutcome, TransactionId,
    TransactionIdError, TRANSACTION_PREFIX,
};
pub use mock::{ChargeRequest, MockBehavior, MockGateway, RefundRequest};
pub use processor::{PaymentProcessor, PaymentReceipt, RefundReceipt};
