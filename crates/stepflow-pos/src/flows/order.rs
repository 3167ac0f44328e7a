//! The order intake flow
//!
//! Four steps: customer lookup, service selection, payment details,
//! and a confirmation step. The first three support temporary save so
//! a half-taken order can be parked while the counter is busy.

use crate::catalog::Order;
use crate::drafts::OrderDraft;
use std::sync::Arc;
use stepflow_core::{DraftData, FlowDefinition, FlowError, FlowId, StepDefinition, StepValidator};

/// Step 1: both contact fields must be filled (or a member bound)
struct CustomerStepValidator;

impl StepValidator for CustomerStepValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<OrderDraft>()
            .map(|d| d.customer.has_contact())
            .unwrap_or(false)
    }
}

/// Step 2: at least one service line with a positive quantity
struct ServicesStepValidator;

impl StepValidator for ServicesStepValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<OrderDraft>()
            .map(|d| !d.lines.is_empty() && d.lines.iter().all(|l| l.quantity > 0))
            .unwrap_or(false)
    }
}

/// Step 3: a payment method must be chosen
///
/// Point redemption needs no gate of its own: requested points are
/// clamped to the subtotal when totals are computed.
struct PaymentStepValidator;

impl StepValidator for PaymentStepValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<OrderDraft>()
            .map(|d| d.payment_method.is_some())
            .unwrap_or(false)
    }
}

/// The order intake flow definition
pub fn order_flow() -> FlowDefinition {
    FlowDefinition::new(
        FlowId("order".to_string()),
        "Order intake",
        vec![
            StepDefinition::new(1, "Customer", "order/customer")
                .with_temp_save()
                .with_validator(Arc::new(CustomerStepValidator)),
            StepDefinition::new(2, "Services", "order/services")
                .with_temp_save()
                .with_validator(Arc::new(ServicesStepValidator)),
            StepDefinition::new(3, "Payment", "order/payment")
                .with_temp_save()
                .with_validator(Arc::new(PaymentStepValidator)),
            StepDefinition::new(4, "Confirm", "order/confirm").with_terminal(),
        ],
    )
}

/// Build the order record from a completed flow's final draft
pub fn finalize_order(final_draft: &DraftData) -> Result<Order, FlowError> {
    let draft: OrderDraft = final_draft.to()?;
    if draft.lines.is_empty() {
        return Err(FlowError::ValidationError(
            "Cannot finalize an order with no service lines".to_string(),
        ));
    }
    Ok(Order::new(
        draft.customer,
        draft.lines,
        draft.discount,
        draft.requested_points,
        draft.no_vat,
    ))
}
