//! Payment registration against a payable amount
//!
//! The sell flow allows several payment registrations against one
//! payable amount; each registration reduces the running remaining
//! balance. Terminal success is reached only when the balance hits
//! zero, and no single registration may exceed the balance at the
//! time it is made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stepflow_core::FlowError;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash over the counter
    Cash,

    /// Card terminal
    Card,

    /// Bank transfer
    Transfer,
}

/// One registered payment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRegistration {
    /// How the payment was made
    pub method: PaymentMethod,

    /// Amount of the payment
    pub amount: i64,

    /// When the payment was registered
    pub registered_at: DateTime<Utc>,
}

/// Running ledger of payments against one payable amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentLedger {
    payable: i64,
    payments: Vec<PaymentRegistration>,
}

impl PaymentLedger {
    /// Create a ledger for a payable amount
    pub fn new(payable: i64) -> Self {
        Self {
            payable: payable.max(0),
            payments: Vec::new(),
        }
    }

    /// Rebuild a ledger from previously registered payments
    pub fn with_payments(payable: i64, payments: Vec<PaymentRegistration>) -> Self {
        Self {
            payable: payable.max(0),
            payments,
        }
    }

    /// The amount the ledger settles against
    #[inline]
    pub fn payable(&self) -> i64 {
        self.payable
    }

    /// Sum of registered payments
    #[inline]
    pub fn paid(&self) -> i64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Remaining balance
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.payable - self.paid()
    }

    /// Whether the payable amount is fully covered
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining() == 0
    }

    /// The registered payments, in registration order
    #[inline]
    pub fn payments(&self) -> &[PaymentRegistration] {
        &self.payments
    }

    /// Register a payment against the remaining balance
    ///
    /// Rejects non-positive amounts and amounts exceeding the balance
    /// at the time of registration. Returns the new remaining balance.
    pub fn register(&mut self, method: PaymentMethod, amount: i64) -> Result<i64, FlowError> {
        if amount <= 0 {
            return Err(FlowError::ValidationError(format!(
                "Payment amount must be positive, got {}",
                amount
            )));
        }
        let remaining = self.remaining();
        if amount > remaining {
            return Err(FlowError::OverPayment { amount, remaining });
        }

        self.payments.push(PaymentRegistration {
            method,
            amount,
            registered_at: Utc::now(),
        });
        tracing::debug!(amount, remaining = self.remaining(), "Payment registered");
        Ok(self.remaining())
    }
}

/// Change owed for a cash amount tendered against a charge
#[inline]
pub fn cash_change(tendered: i64, charge: i64) -> i64 {
    (tendered - charge).max(0)
}
