//! Payment gateway interface
//!
//! The gateway is an external collaborator. The core validates only the
//! surface shape of its tokens (the `txn_` prefix) and otherwise treats
//! them as opaque.

use libris_core::PatronId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Prefix carried by every gateway-minted transaction id
pub const TRANSACTION_PREFIX: &str = "txn_";

/// Errors that can occur when parsing a transaction id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionIdError {
    #[error("Invalid transaction ID {0:?}. Expected the \"txn_\" prefix.")]
    Malformed(String),
}

/// A gateway-minted transaction token.
///
/// Only the prefix is checked; everything after it is the gateway's
/// business and is propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Parse a transaction id, accepting any string with the `txn_` prefix
    pub fn parse(value: &str) -> Result<Self, TransactionIdError> {
        if value.starts_with(TRANSACTION_PREFIX) {
            Ok(Self(value.to_owned()))
        } else {
            Err(TransactionIdError::Malformed(value.to_owned()))
        }
    }

    /// Mint a fresh id for a patron's charge
    pub fn mint(patron: &PatronId) -> Self {
        Self(format!(
            "{}{}_{}",
            TRANSACTION_PREFIX,
            patron,
            &Uuid::new_v4().to_string()[..8]
        ))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = TransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TransactionId {
    type Error = TransactionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

/// The gateway's business answer to a charge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Charge accepted; the minted id and the gateway's confirmation text
    Approved {
        transaction_id: TransactionId,
        message: String,
    },
    /// Charge refused (card declined, account closed, ...)
    Declined { message: String },
}

/// The gateway's business answer to a refund request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundOutcome {
    Approved { message: String },
    Declined { message: String },
}

/// Transport-level gateway failures, distinct from business declines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),

    #[error("Gateway returned an unusable response: {0}")]
    BadResponse(String),
}

/// External payment service consumed by the processor.
///
/// Both calls are synchronous and are invoked at most once per operation;
/// retry policy belongs to the host, not this layer.
pub trait PaymentGateway: Send + Sync {
    /// Charge a patron's account on file
    fn charge(
        &self,
        patron: &PatronId,
        amount: Decimal,
        description: &str,
    ) -> Result<ChargeOutcome, GatewayError>;

    /// Refund a previously settled charge
    fn refund(
        &self,
        transaction: &TransactionId,
        amount: Decimal,
    ) -> Result<RefundOutcome, GatewayError>;
}
