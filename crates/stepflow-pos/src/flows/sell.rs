//! The product sell flow
//!
//! Three steps: product selection, payment, and a receipt step. The
//! payment step stays invalid until the registered payments cover the
//! payable amount, so split payments naturally gate the advance to the
//! receipt.

use crate::drafts::SellDraft;
use std::sync::Arc;
use stepflow_core::{DraftData, FlowDefinition, FlowId, StepDefinition, StepValidator};

/// Step 1: at least one product with a positive quantity
struct ProductsStepValidator;

impl StepValidator for ProductsStepValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<SellDraft>()
            .map(|d| !d.items.is_empty() && d.items.iter().all(|i| i.quantity > 0))
            .unwrap_or(false)
    }
}

/// Step 2: the sale must be fully paid before moving on
struct PaymentSettledValidator;

impl StepValidator for PaymentSettledValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<SellDraft>()
            .map(|d| d.is_settled())
            .unwrap_or(false)
    }
}

/// The product sell flow definition
pub fn sell_flow() -> FlowDefinition {
    FlowDefinition::new(
        FlowId("sell".to_string()),
        "Product sale",
        vec![
            StepDefinition::new(1, "Products", "sell/products")
                .with_validator(Arc::new(ProductsStepValidator)),
            StepDefinition::new(2, "Payment", "sell/payment")
                .with_validator(Arc::new(PaymentSettledValidator)),
            StepDefinition::new(3, "Receipt", "sell/receipt").with_terminal(),
        ],
    )
}
