use crate::domain::flow_definition::FlowDefinition;
use crate::DraftData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracks the boolean validity of each step
///
/// Validity defaults to `false` for any step never explicitly set,
/// except steps without a validator, which are always valid. Validity
/// is step-local: only the active step's content (or its registered
/// validator) mutates its own entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationGate {
    validity: HashMap<u32, bool>,

    /// Steps that carry no validator and are therefore always valid
    always_valid: Vec<u32>,
}

impl ValidationGate {
    /// Create a gate for a flow definition
    ///
    /// Steps without a validator are pre-seeded as always valid.
    pub fn new(definition: &FlowDefinition) -> Self {
        let always_valid = definition
            .steps
            .iter()
            .filter(|step| step.validator.is_none())
            .map(|step| step.index)
            .collect();

        Self {
            validity: HashMap::new(),
            always_valid,
        }
    }

    /// Set the validity of a step
    ///
    /// Called by the active step's content whenever its internal form
    /// state changes. Setting validity on an always-valid step is a
    /// no-op.
    pub fn set_validity(&mut self, step: u32, is_valid: bool) {
        if self.always_valid.contains(&step) {
            return;
        }
        self.validity.insert(step, is_valid);
    }

    /// Whether a step is currently valid
    pub fn is_valid(&self, step: u32) -> bool {
        if self.always_valid.contains(&step) {
            return true;
        }
        self.validity.get(&step).copied().unwrap_or(false)
    }

    /// Re-run a step's validator against the draft and record the result
    ///
    /// No-op for steps without a validator.
    pub fn revalidate(&mut self, definition: &FlowDefinition, step: u32, draft: &DraftData) {
        if let Ok(step_def) = definition.step(step) {
            if let Some(validator) = &step_def.validator {
                let is_valid = validator.validate(draft);
                self.validity.insert(step, is_valid);
            }
        }
    }
}
