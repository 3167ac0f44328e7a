//! The return / issue flow
//!
//! Three steps: find the original order, record the issue, and choose
//! a resolution. The resolution step is terminal *and* carries a
//! validator, so completion stays blocked until a resolution is
//! actually picked.

use crate::drafts::ReturnDraft;
use std::sync::Arc;
use stepflow_core::{DraftData, FlowDefinition, FlowId, StepDefinition, StepValidator};

/// Step 1: an order must be looked up first
struct OrderLookupValidator;

impl StepValidator for OrderLookupValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<ReturnDraft>()
            .map(|d| d.order_id.is_some())
            .unwrap_or(false)
    }
}

/// Step 2: a reason and at least one affected line
struct IssueDetailsValidator;

impl StepValidator for IssueDetailsValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<ReturnDraft>()
            .map(|d| !d.reason.trim().is_empty() && !d.items.is_empty())
            .unwrap_or(false)
    }
}

/// Step 3: a resolution must be chosen before the flow can complete
struct ResolutionValidator;

impl StepValidator for ResolutionValidator {
    fn validate(&self, draft: &DraftData) -> bool {
        draft
            .to::<ReturnDraft>()
            .map(|d| d.resolution.is_some())
            .unwrap_or(false)
    }
}

/// The return / issue flow definition
pub fn return_flow() -> FlowDefinition {
    FlowDefinition::new(
        FlowId("return".to_string()),
        "Return / issue",
        vec![
            StepDefinition::new(1, "Find order", "return/lookup")
                .with_validator(Arc::new(OrderLookupValidator)),
            StepDefinition::new(2, "Issue details", "return/details")
                .with_temp_save()
                .with_validator(Arc::new(IssueDetailsValidator)),
            StepDefinition::new(3, "Resolution", "return/resolution")
                .with_terminal()
                .with_validator(Arc::new(ResolutionValidator)),
        ],
    )
}
