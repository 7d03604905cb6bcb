//! Mock gateway for testing
//!
//! Configurable outcomes and full request recording, so tests can assert
//! both how often the gateway was called and with what.

use crate::gateway::{
    ChargeOutcome, GatewayError, PaymentGateway, RefundOutcome, TransactionId,
};
use libris_core::PatronId;
use rust_decimal::Decimal;
use std::sync::RwLock;

/// What the mock does with the next requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Approve everything, minting fresh transaction ids
    Approve,
    /// Decline with the given business message
    Decline { message: String },
    /// Fail at the transport level
    Fail { reason: String },
}

/// A recorded charge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub patron: PatronId,
    pub amount: Decimal,
    pub description: String,
}

/// A recorded refund request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRequest {
    pub transaction: TransactionId,
    pub amount: Decimal,
}

/// In-memory gateway double
pub struct MockGateway {
    behavior: RwLock<MockBehavior>,
    charges: RwLock<Vec<ChargeRequest>>,
    refunds: RwLock<Vec<RefundRequest>>,
}

impl MockGateway {
    /// Gateway that approves everything
    pub fn new() -> Self {
        Self {
            behavior: RwLock::new(MockBehavior::Approve),
            charges: RwLock::new(Vec::new()),
            refunds: RwLock::new(Vec::new()),
        }
    }

    /// Gateway that declines with the given message
    pub fn declining(message: &str) -> Self {
        let gateway = Self::new();
        gateway.set_behavior(MockBehavior::Decline {
            message: message.to_string(),
        });
        gateway
    }

    /// Gateway that fails at the transport level
    pub fn failing(reason: &str) -> Self {
        let gateway = Self::new();
        gateway.set_behavior(MockBehavior::Fail {
            reason: reason.to_string(),
        });
        gateway
    }

    /// Switch behavior for subsequent requests
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.write().unwrap() = behavior;
    }

    /// Number of charge requests received
    pub fn charge_count(&self) -> usize {
        self.charges.read().unwrap().len()
    }

    /// Number of refund requests received
    pub fn refund_count(&self) -> usize {
        self.refunds.read().unwrap().len()
    }

    /// Every charge request received, in order
    pub fn charges(&self) -> Vec<ChargeRequest> {
        self.charges.read().unwrap().clone()
    }

    /// Every refund request received, in order
    pub fn refunds(&self) -> Vec<RefundRequest> {
        self.refunds.read().unwrap().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for MockGateway {
    fn charge(
        &self,
        patron: &PatronId,
        amount: Decimal,
        description: &str,
    ) -> Result<ChargeOutcome, GatewayError> {
        self.charges.write().unwrap().push(ChargeRequest {
            patron: patron.clone(),
            amount,
            description: description.to_string(),
        });
        match &*self.behavior.read().unwrap() {
            MockBehavior::Approve => Ok(ChargeOutcome::Approved {
                transaction_id: TransactionId::mint(patron),
                message: format!("Charged {amount} to card on file"),
            }),
            MockBehavior::Decline { message } => Ok(ChargeOutcome::Declined {
                message: message.clone(),
            }),
            MockBehavior::Fail { reason } => Err(GatewayError::Unreachable(reason.clone())),
        }
    }

    fn refund(
        &self,
        transaction: &TransactionId,
        amount: Decimal,
    ) -> Result<RefundOutcome, GatewayError> {
        self.refunds.write().unwrap().push(RefundRequest {
            transaction: transaction.clone(),
            amount,
        });
        match &*self.behavior.read().unwrap() {
            MockBehavior::Approve => Ok(RefundOutcome::Approved {
                message: format!("Refunded {amount} to {transaction}"),
            }),
            MockBehavior::Decline { message } => Ok(RefundOutcome::Declined {
                message: message.clone(),
            }),
            MockBehavior::Fail { reason } => Err(GatewayError::Unreachable(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn patron() -> PatronId {
        PatronId::parse("123456").unwrap()
    }

    #[test]
    fn test_approve_mints_prefixed_ids() {
        let gateway = MockGateway::new();
        let outcome = gateway.charge(&patron(), dec!(6.50), "Late fees").unwrap();
        match outcome {
            ChargeOutcome::Approved { transaction_id, .. } => {
                assert!(transaction_id.as_str().starts_with("txn_123456_"));
            }
            other => panic!("expected approval, got {other:?}"),
        }
    }

    #[test]
    fn test_requests_are_recorded() {
        let gateway = MockGateway::new();
        gateway.charge(&patron(), dec!(1.00), "first").unwrap();
        gateway.charge(&patron(), dec!(2.00), "second").unwrap();

        assert_eq!(gateway.charge_count(), 2);
        let charges = gateway.charges();
        assert_eq!(charges[0].amount, dec!(1.00));
        assert_eq!(charges[1].description, "second");
    }

    #[test]
    fn test_decline_still_records() {
        let gateway = MockGateway::declining("card expired");
        let outcome = gateway.charge(&patron(), dec!(5.00), "Late fees").unwrap();
        assert_eq!(
            outcome,
            ChargeOutcome::Declined {
                message: "card expired".to_string()
            }
        );
        assert_eq!(gateway.charge_count(), 1);
    }

    #[test]
    fn test_transport_failure() {
        let gateway = MockGateway::failing("connection reset");
        let err = gateway.charge(&patron(), dec!(5.00), "Late fees").unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)));
    }

    #[test]
    fn test_behavior_switch_midstream() {
        let gateway = MockGateway::new();
        let tx = TransactionId::parse("txn_x").unwrap();
        assert!(matches!(
            gateway.refund(&tx, dec!(1.00)),
            Ok(RefundOutcome::Approved { .. })
        ));
        gateway.set_behavior(MockBehavior::Decline {
            message: "no longer refundable".to_string(),
        });
        assert!(matches!(
            gateway.refund(&tx, dec!(1.00)),
            Ok(RefundOutcome::Declined { .. })
        ));
        assert_eq!(gateway.refund_count(), 2);
    }
}
