use crate::{DraftData, FlowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Value object: Flow ID
///
/// Identifies a flow *type* (e.g. "order", "sell", "return"), not a
/// running instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(pub String);

/// Step-local validity check
///
/// Implementations receive the current draft and decide whether the
/// step's business rules are satisfied. A validator must only look at
/// the draft slices its own step writes; it never needs to know about
/// another step's data structure.
pub trait StepValidator: Send + Sync {
    /// Returns true when the step's data satisfies its business rules
    fn validate(&self, draft: &DraftData) -> bool;
}

impl<F> StepValidator for F
where
    F: Fn(&DraftData) -> bool + Send + Sync,
{
    fn validate(&self, draft: &DraftData) -> bool {
        self(draft)
    }
}

/// Represents a step in a flow
///
/// Steps are indexed 1-based. A step without a validator (e.g. a pure
/// summary or receipt step) is treated as always valid.
#[derive(Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// 1-based index of the step within its flow
    pub index: u32,

    /// Human-readable label shown in the progress indicator
    pub label: String,

    /// Identity of the renderer the hosting screen mounts for this step
    pub renderer: String,

    /// Whether the step supports "temporary save" of the draft
    pub supports_temp_save: bool,

    /// Whether this is the terminal (final) step of the flow
    pub terminal: bool,

    /// Optional validator; absent means the step is always valid
    #[serde(skip)]
    pub validator: Option<Arc<dyn StepValidator>>,
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("index", &self.index)
            .field("label", &self.label)
            .field("renderer", &self.renderer)
            .field("supports_temp_save", &self.supports_temp_save)
            .field("terminal", &self.terminal)
            .field("validator", &self.validator.as_ref().map(|_| "<validator>"))
            .finish()
    }
}

impl StepDefinition {
    /// Create a step definition with no validator and no capabilities
    pub fn new(index: u32, label: &str, renderer: &str) -> Self {
        Self {
            index,
            label: label.to_string(),
            renderer: renderer.to_string(),
            supports_temp_save: false,
            terminal: false,
            validator: None,
        }
    }

    /// Declare the temp-save capability on this step
    pub fn with_temp_save(mut self) -> Self {
        self.supports_temp_save = true;
        self
    }

    /// Mark this step as the terminal step of its flow
    pub fn with_terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Attach a validator to this step
    pub fn with_validator(mut self, validator: Arc<dyn StepValidator>) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Represents a validated flow definition
///
/// A flow definition is constant for the lifetime of a flow type; the
/// per-invocation state lives in the flow shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDefinition {
    /// ID of the flow type
    pub id: FlowId,

    /// The flow version
    pub version: String,

    /// Human-readable name of the flow
    pub name: String,

    /// The steps in this flow, ordered by index
    pub steps: Vec<StepDefinition>,

    /// The step the flow enters on
    pub entry_step: u32,
}

impl FlowDefinition {
    /// Create a flow definition entering at step 1
    pub fn new(id: FlowId, name: &str, steps: Vec<StepDefinition>) -> Self {
        Self {
            id,
            version: "1.0".to_string(),
            name: name.to_string(),
            steps,
            entry_step: 1,
        }
    }

    /// Total number of steps in the flow
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    /// Look up the step definition for a 1-based index
    ///
    /// This is the step registry: a pure lookup with no side effects.
    pub fn step(&self, index: u32) -> Result<&StepDefinition, FlowError> {
        if index < 1 || index > self.total_steps() {
            return Err(FlowError::StepOutOfRange {
                step: index,
                total: self.total_steps(),
            });
        }
        Ok(&self.steps[(index - 1) as usize])
    }

    /// Validate the flow definition
    pub fn validate(&self) -> Result<(), FlowError> {
        // Check for empty steps
        if self.steps.is_empty() {
            return Err(FlowError::ValidationError(
                "Flow must have at least one step".to_string(),
            ));
        }

        // Check that indices are contiguous and 1-based
        for (position, step) in self.steps.iter().enumerate() {
            let expected = (position + 1) as u32;
            if step.index != expected {
                return Err(FlowError::ValidationError(format!(
                    "Step at position {} has index {}, expected {}",
                    position, step.index, expected
                )));
            }
        }

        // Exactly one terminal step, and it must be the last
        let terminal_count = self.steps.iter().filter(|s| s.terminal).count();
        if terminal_count != 1 {
            return Err(FlowError::ValidationError(format!(
                "Flow must have exactly one terminal step, found {}",
                terminal_count
            )));
        }
        if !self.steps.last().map(|s| s.terminal).unwrap_or(false) {
            return Err(FlowError::ValidationError(
                "Terminal step must be the last step".to_string(),
            ));
        }

        // Entry step must be in range
        if self.entry_step < 1 || self.entry_step > self.total_steps() {
            return Err(FlowError::ValidationError(format!(
                "Entry step {} out of range",
                self.entry_step
            )));
        }

        Ok(())
    }
}
