//! Typed views over the flow drafts
//!
//! Each flow stores its working data in the engine's opaque JSON
//! draft; these structures give the step validators and hosting
//! screens a typed view of it. Every field defaults so a partially
//! filled draft always deserializes.

use crate::customer::CustomerBinding;
use crate::catalog::OrderId;
use crate::payment::{PaymentLedger, PaymentMethod, PaymentRegistration};
use crate::pricing::{LineItem, Totals};
use serde::{Deserialize, Serialize};
use stepflow_core::FlowError;

/// Working data of the order intake flow
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderDraft {
    /// Customer lookup state
    pub customer: CustomerBinding,

    /// Selected services
    pub lines: Vec<LineItem>,

    /// Discount granted at intake
    pub discount: i64,

    /// Points the customer asked to redeem
    pub requested_points: i64,

    /// Whether VAT is waived
    pub no_vat: bool,

    /// Chosen payment method
    pub payment_method: Option<PaymentMethod>,
}

impl OrderDraft {
    /// Recompute the draft's totals from its line items
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.lines, self.discount, self.requested_points, self.no_vat)
    }
}

/// Working data of the product sell flow
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SellDraft {
    /// Products in the basket
    pub items: Vec<LineItem>,

    /// Discount granted at the till
    pub discount: i64,

    /// Whether VAT is waived
    pub no_vat: bool,

    /// Payments registered so far
    pub payments: Vec<PaymentRegistration>,
}

impl SellDraft {
    /// Recompute the draft's totals from its basket
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, self.discount, 0, self.no_vat)
    }

    /// The payment ledger over the current payable amount
    pub fn ledger(&self) -> PaymentLedger {
        PaymentLedger::with_payments(self.totals().payable, self.payments.clone())
    }

    /// Remaining balance after the registered payments
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.ledger().remaining()
    }

    /// Whether the sale is fully paid
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.ledger().is_settled()
    }

    /// Register a payment against the remaining balance
    ///
    /// Returns the new remaining balance, or rejects the registration
    /// without changing the draft.
    pub fn register_payment(
        &mut self,
        method: PaymentMethod,
        amount: i64,
    ) -> Result<i64, FlowError> {
        let mut ledger = self.ledger();
        let remaining = ledger.register(method, amount)?;
        self.payments = ledger.payments().to_vec();
        Ok(remaining)
    }
}

/// How a returned order is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Money back
    Refund,

    /// Clean the items again at no charge
    Redo,

    /// Claim rejected after inspection
    Rejected,
}

/// Working data of the return / issue flow
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReturnDraft {
    /// The order the issue is about
    pub order_id: Option<OrderId>,

    /// What the customer reported
    pub reason: String,

    /// The affected lines
    pub items: Vec<LineItem>,

    /// Chosen resolution
    pub resolution: Option<Resolution>,
}
