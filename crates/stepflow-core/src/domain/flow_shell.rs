use crate::{
    domain::draft::DraftStore,
    domain::events::{DraftSaved, FlowAbandoned, FlowCompleted, FlowEvent, StepChanged},
    domain::flow_definition::{FlowDefinition, FlowId, StepDefinition},
    domain::navigation::{NavigationState, Progress},
    domain::validation::ValidationGate,
    DraftData, FlowError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Value object: Flow instance ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowInstanceId(pub String);

/// Status of a flow invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// Flow is in progress
    Active,

    /// Flow completed from its terminal step
    Completed,

    /// Flow was abandoned back to the caller
    Abandoned,
}

/// A saved draft allowing a flow to be resumed later
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftSnapshot {
    /// The flow instance the snapshot was taken from
    pub instance_id: FlowInstanceId,

    /// The flow type the snapshot belongs to
    pub flow_id: FlowId,

    /// The step that was active when the snapshot was taken
    pub step: u32,

    /// The draft at the moment of saving
    pub draft: DraftData,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
}

/// Aggregate: one flow invocation
///
/// The shell owns the navigation state, validation gate, and draft
/// store of a single flow invocation, and records the domain events
/// the hosting screen consumes. All transitions are synchronous; every
/// transition either fully applies or is fully rejected before any
/// state mutation.
#[derive(Debug)]
pub struct FlowShell {
    /// Unique identifier of this invocation
    pub id: FlowInstanceId,

    /// The flow definition (constant for the flow type)
    pub definition: Arc<FlowDefinition>,

    /// Current status
    pub status: FlowStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,

    nav: NavigationState,
    gate: ValidationGate,
    draft: DraftStore,
    events: Vec<Box<dyn FlowEvent>>,
}

impl FlowShell {
    /// Enter a flow with a fresh or caller-provided initial draft
    pub fn new(definition: Arc<FlowDefinition>, initial: DraftData) -> Result<Self, FlowError> {
        definition.validate()?;
        let now = Utc::now();
        let gate = ValidationGate::new(&definition);
        let nav = NavigationState::new(definition.entry_step, definition.total_steps());

        Ok(Self {
            id: FlowInstanceId(Uuid::new_v4().to_string()),
            definition,
            status: FlowStatus::Active,
            created_at: now,
            updated_at: now,
            nav,
            gate,
            draft: DraftStore::new(initial),
            events: Vec::with_capacity(8),
        })
    }

    /// Re-enter a flow from a temp-save snapshot
    ///
    /// The draft and position are rehydrated from the snapshot, and the
    /// gate is re-seeded by running the validators of every step up to
    /// the saved one against the restored draft.
    pub fn resume(
        definition: Arc<FlowDefinition>,
        snapshot: DraftSnapshot,
    ) -> Result<Self, FlowError> {
        definition.validate()?;
        if snapshot.flow_id != definition.id {
            return Err(FlowError::ValidationError(format!(
                "Snapshot belongs to flow {:?}, not {:?}",
                snapshot.flow_id, definition.id
            )));
        }
        // Range-check the saved step before trusting it
        definition.step(snapshot.step)?;

        let now = Utc::now();
        let mut gate = ValidationGate::new(&definition);
        for step in 1..=snapshot.step {
            gate.revalidate(&definition, step, &snapshot.draft);
        }
        let mut nav = NavigationState::new(definition.entry_step, definition.total_steps());
        nav.move_to(snapshot.step);

        Ok(Self {
            id: snapshot.instance_id,
            definition,
            status: FlowStatus::Active,
            created_at: snapshot.saved_at,
            updated_at: now,
            nav,
            gate,
            draft: DraftStore::new(snapshot.draft),
            events: Vec::with_capacity(8),
        })
    }

    /// The definition of the active step
    pub fn active_step(&self) -> &StepDefinition {
        // Invariant: 1 <= current <= total holds after every transition
        &self.definition.steps[(self.nav.current - 1) as usize]
    }

    /// The active step index (1-based)
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.nav.current
    }

    /// Progress indicator data for the hosting UI
    #[inline]
    pub fn progress(&self) -> Progress {
        Progress {
            current: self.nav.current,
            max_reached: self.nav.max_reached,
            total: self.nav.total,
        }
    }

    /// Read access to the draft
    #[inline]
    pub fn draft(&self) -> &DraftData {
        self.draft.get()
    }

    /// Whether a step is currently valid
    #[inline]
    pub fn is_valid(&self, step: u32) -> bool {
        self.gate.is_valid(step)
    }

    /// Whether a step is considered completed
    #[inline]
    pub fn is_step_completed(&self, step: u32) -> bool {
        self.nav.is_completed(step)
    }

    /// Explicitly mark a step as completed
    pub fn mark_step_completed(&mut self, step: u32) {
        self.nav.mark_completed(step);
        self.update_timestamp();
    }

    /// Whether the Next control should be enabled
    pub fn can_next(&self) -> bool {
        self.status == FlowStatus::Active && self.gate.is_valid(self.nav.current)
    }

    /// Whether a jump to the given step would be taken
    pub fn can_jump_to(&self, target: u32) -> bool {
        self.status == FlowStatus::Active
            && self.nav.reachable(target)
            && (target <= self.nav.current || self.gate.is_valid(self.nav.current))
    }

    /// Advance to the next step, or complete the flow at the terminal step
    ///
    /// Attempting Next while the active step is invalid is a no-op, not
    /// an error: the hosting UI simply keeps the button disabled.
    pub fn next(&mut self) -> Result<(), FlowError> {
        if self.status != FlowStatus::Active {
            return Err(FlowError::IllegalTransition(format!(
                "Cannot advance a flow in status {:?}",
                self.status
            )));
        }
        if !self.gate.is_valid(self.nav.current) {
            tracing::debug!(
                flow = %self.definition.id.0,
                step = self.nav.current,
                "Next ignored: active step invalid"
            );
            return Ok(());
        }

        if self.nav.at_terminal() {
            self.status = FlowStatus::Completed;
            self.record_event(Box::new(FlowCompleted {
                flow_instance_id: self.id.clone(),
                final_draft: self.draft.snapshot(),
                timestamp: Utc::now(),
            }));
            tracing::debug!(flow = %self.definition.id.0, "Flow completed");
        } else {
            self.nav.mark_completed(self.nav.current);
            let target = self.nav.current + 1;
            self.nav.move_to(target);
            self.record_event(Box::new(StepChanged {
                flow_instance_id: self.id.clone(),
                new_step: target,
                timestamp: Utc::now(),
            }));
            tracing::debug!(flow = %self.definition.id.0, step = target, "Moved to next step");
        }

        self.update_timestamp();
        Ok(())
    }

    /// Move to the previous step, or abandon the flow from step 1
    ///
    /// Going back never requires validity of the step being left. Back
    /// from step 1 emits `FlowAbandoned` and leaves the navigation
    /// state unchanged; repeating it is idempotent.
    pub fn back(&mut self) -> Result<(), FlowError> {
        if self.status == FlowStatus::Completed {
            return Err(FlowError::IllegalTransition(
                "Cannot go back in a completed flow".to_string(),
            ));
        }

        if self.nav.at_first() {
            self.status = FlowStatus::Abandoned;
            self.record_event(Box::new(FlowAbandoned {
                flow_instance_id: self.id.clone(),
                timestamp: Utc::now(),
            }));
            tracing::debug!(flow = %self.definition.id.0, "Flow abandoned");
        } else {
            let target = self.nav.current - 1;
            self.nav.move_to(target);
            self.record_event(Box::new(StepChanged {
                flow_instance_id: self.id.clone(),
                new_step: target,
                timestamp: Utc::now(),
            }));
            tracing::debug!(flow = %self.definition.id.0, step = target, "Moved back");
        }

        self.update_timestamp();
        Ok(())
    }

    /// Jump directly to a step
    ///
    /// Jumping backward or to a previously reached step is always
    /// permitted; jumping forward requires the active step to be valid
    /// and never skips past the first unreached step. A refused jump
    /// changes no state and returns `Ok(false)`. An index outside the
    /// flow's range is a programmer error and fails fast.
    pub fn jump_to(&mut self, target: u32) -> Result<bool, FlowError> {
        // Registry lookup doubles as the range check
        self.definition.step(target)?;

        if self.status != FlowStatus::Active {
            return Err(FlowError::IllegalTransition(format!(
                "Cannot jump in a flow in status {:?}",
                self.status
            )));
        }

        if !self.can_jump_to(target) {
            tracing::debug!(
                flow = %self.definition.id.0,
                from = self.nav.current,
                to = target,
                "Jump refused"
            );
            return Ok(false);
        }

        if target != self.nav.current {
            self.nav.move_to(target);
            self.record_event(Box::new(StepChanged {
                flow_instance_id: self.id.clone(),
                new_step: target,
                timestamp: Utc::now(),
            }));
            self.update_timestamp();
        }
        Ok(true)
    }

    /// Take a temp-save snapshot of the draft
    ///
    /// Available only on steps declaring the temp-save capability.
    /// Orthogonal to navigation: the position is unchanged afterwards.
    pub fn temp_save(&mut self) -> Result<DraftSnapshot, FlowError> {
        let step = self.active_step();
        if !step.supports_temp_save {
            return Err(FlowError::IllegalTransition(format!(
                "Step {} ({}) does not support temporary save",
                step.index, step.label
            )));
        }

        let snapshot = DraftSnapshot {
            instance_id: self.id.clone(),
            flow_id: self.definition.id.clone(),
            step: self.nav.current,
            draft: self.draft.snapshot(),
            saved_at: Utc::now(),
        };
        self.record_event(Box::new(DraftSaved {
            flow_instance_id: self.id.clone(),
            snapshot: snapshot.clone(),
            timestamp: snapshot.saved_at,
        }));
        self.update_timestamp();
        Ok(snapshot)
    }

    /// Set the validity of the active step
    ///
    /// Pushed by the active step's content whenever its form state
    /// changes. Only the active step's validity can be set this way.
    pub fn set_validity(&mut self, is_valid: bool) {
        self.gate.set_validity(self.nav.current, is_valid);
        self.update_timestamp();
    }

    /// Shallow-merge a partial update into the draft
    ///
    /// Only the active step's validator is re-run; previously validated
    /// earlier steps are never silently invalidated by a merge.
    pub fn merge_draft(&mut self, partial: serde_json::Value) {
        self.draft.merge(partial);
        self.gate
            .revalidate(&self.definition, self.nav.current, self.draft.get());
        self.update_timestamp();
    }

    /// Record a domain event
    pub fn record_event(&mut self, event: Box<dyn FlowEvent>) {
        self.events.push(event);
    }

    /// Get and clear all recorded domain events
    pub fn take_events(&mut self) -> Vec<Box<dyn FlowEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Update the timestamp
    #[inline]
    fn update_timestamp(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow_definition::{StepDefinition, StepValidator};
    use serde_json::json;

    fn validator(key: &'static str) -> Arc<dyn StepValidator> {
        Arc::new(move |draft: &DraftData| {
            draft.as_value()[key].as_bool().unwrap_or(false)
        })
    }

    fn four_step_definition() -> Arc<FlowDefinition> {
        Arc::new(FlowDefinition::new(
            FlowId("order".to_string()),
            "Order",
            vec![
                StepDefinition::new(1, "Customer", "customer")
                    .with_temp_save()
                    .with_validator(validator("step1_ok")),
                StepDefinition::new(2, "Services", "services")
                    .with_temp_save()
                    .with_validator(validator("step2_ok")),
                StepDefinition::new(3, "Payment", "payment")
                    .with_validator(validator("step3_ok")),
                StepDefinition::new(4, "Confirm", "confirm").with_terminal(),
            ],
        ))
    }

    fn active_shell() -> FlowShell {
        FlowShell::new(four_step_definition(), DraftData::empty()).unwrap()
    }

    #[test]
    fn test_shell_creation() {
        let shell = active_shell();

        assert_eq!(shell.status, FlowStatus::Active);
        assert_eq!(shell.current_step(), 1);
        assert_eq!(shell.progress().total, 4);
        assert_eq!(shell.active_step().label, "Customer");
        assert!(!shell.id.0.is_empty());
        assert!(shell.created_at <= Utc::now());
    }

    #[test]
    fn test_next_is_noop_while_invalid() {
        let mut shell = active_shell();

        assert!(!shell.can_next());
        shell.next().unwrap();
        assert_eq!(shell.current_step(), 1);
        assert!(shell.take_events().is_empty());
    }

    #[test]
    fn test_next_advances_when_valid() {
        let mut shell = active_shell();

        shell.merge_draft(json!({"step1_ok": true}));
        assert!(shell.can_next());
        shell.next().unwrap();

        assert_eq!(shell.current_step(), 2);
        let events = shell.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "flow.step_changed");
    }

    #[test]
    fn test_back_preserves_validity() {
        let mut shell = active_shell();

        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();
        assert_eq!(shell.current_step(), 2);

        shell.back().unwrap();
        assert_eq!(shell.current_step(), 1);
        // Step 1 validity is unchanged by going back
        assert!(shell.is_valid(1));
    }

    #[test]
    fn test_back_from_first_abandons_and_is_idempotent() {
        let mut shell = active_shell();

        shell.back().unwrap();
        assert_eq!(shell.status, FlowStatus::Abandoned);
        assert_eq!(shell.current_step(), 1);

        // Repeating it leaves the navigation state unchanged
        shell.back().unwrap();
        assert_eq!(shell.current_step(), 1);

        let events = shell.take_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_type() == "flow.abandoned"));
    }

    #[test]
    fn test_terminal_next_completes() {
        let mut shell = active_shell();

        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();
        shell.merge_draft(json!({"step2_ok": true}));
        shell.next().unwrap();
        shell.merge_draft(json!({"step3_ok": true}));
        shell.next().unwrap();
        assert_eq!(shell.current_step(), 4);

        // The confirm step has no validator, so it is always valid
        shell.next().unwrap();
        assert_eq!(shell.status, FlowStatus::Completed);
        // Completing does not move the cursor past the terminal step
        assert_eq!(shell.current_step(), 4);

        let events = shell.take_events();
        let completed = events.last().unwrap();
        assert_eq!(completed.event_type(), "flow.completed");
    }

    #[test]
    fn test_next_after_completion_is_an_error() {
        let mut shell = active_shell();
        for key in ["step1_ok", "step2_ok", "step3_ok", "done"] {
            shell.merge_draft(json!({ key: true }));
            shell.next().unwrap();
        }
        assert_eq!(shell.status, FlowStatus::Completed);

        match shell.next() {
            Err(FlowError::IllegalTransition(msg)) => {
                assert!(msg.contains("Completed"));
            }
            other => panic!("Expected IllegalTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_jump_rules() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();
        shell.merge_draft(json!({"step2_ok": true}));
        shell.next().unwrap();
        assert_eq!(shell.current_step(), 3);

        // Backward jumps are always permitted
        assert!(shell.jump_to(1).unwrap());
        assert_eq!(shell.current_step(), 1);

        // Jumping to a previously reached step is permitted
        assert!(shell.jump_to(3).unwrap());
        assert_eq!(shell.current_step(), 3);

        // Step 3 is not yet valid, so jumping forward is refused
        assert!(!shell.jump_to(4).unwrap());
        assert_eq!(shell.current_step(), 3);
    }

    #[test]
    fn test_jump_forward_requires_current_validity() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();
        shell.back().unwrap();
        assert_eq!(shell.current_step(), 1);

        // Step 2 was reached, but forward movement still needs step 1 valid
        shell.merge_draft(json!({"step1_ok": false}));
        assert!(!shell.jump_to(2).unwrap());
        assert_eq!(shell.current_step(), 1);

        shell.merge_draft(json!({"step1_ok": true}));
        assert!(shell.jump_to(2).unwrap());
        assert_eq!(shell.current_step(), 2);
    }

    #[test]
    fn test_jump_out_of_range_is_fatal() {
        let mut shell = active_shell();

        match shell.jump_to(9) {
            Err(FlowError::StepOutOfRange { step, total }) => {
                assert_eq!(step, 9);
                assert_eq!(total, 4);
            }
            other => panic!("Expected StepOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_current_stays_in_bounds_after_every_transition() {
        let mut shell = active_shell();

        let in_bounds = |shell: &FlowShell| {
            let p = shell.progress();
            p.current >= 1 && p.current <= p.total
        };

        for _ in 0..6 {
            // The empty merge re-runs the active step's validator
            shell.merge_draft(json!({"step1_ok": true, "step2_ok": true, "step3_ok": true}));
            let _ = shell.next();
            assert!(in_bounds(&shell));
        }
        let mut shell = active_shell();
        for _ in 0..6 {
            let _ = shell.back();
            assert!(in_bounds(&shell));
        }
    }

    #[test]
    fn test_temp_save_snapshot() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true, "customer": {"name": "Bat"}}));

        let snapshot = shell.temp_save().unwrap();
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.flow_id, FlowId("order".to_string()));
        assert_eq!(*snapshot.draft.as_value(), *shell.draft().as_value());
        // Navigation state is untouched by a temp save
        assert_eq!(shell.current_step(), 1);

        let events = shell.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "flow.draft_saved");
    }

    #[test]
    fn test_temp_save_requires_capability() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true, "step2_ok": true}));
        shell.next().unwrap();
        shell.next().unwrap();
        assert_eq!(shell.active_step().label, "Payment");

        match shell.temp_save() {
            Err(FlowError::IllegalTransition(msg)) => {
                assert!(msg.contains("does not support temporary save"));
            }
            other => panic!("Expected IllegalTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_does_not_invalidate_earlier_steps() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();

        // Step 2 writes its own slice; step 1 stays valid
        shell.merge_draft(json!({"step2_ok": false, "services": [1, 2]}));
        assert!(shell.is_valid(1));
        assert!(!shell.is_valid(2));
    }

    #[test]
    fn test_resume_from_snapshot() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true}));
        shell.next().unwrap();
        shell.merge_draft(json!({"step2_ok": true, "services": ["wash"]}));
        let snapshot = shell.temp_save().unwrap();

        let resumed = FlowShell::resume(four_step_definition(), snapshot).unwrap();
        assert_eq!(resumed.current_step(), 2);
        assert_eq!(resumed.progress().max_reached, 2);
        assert_eq!(resumed.status, FlowStatus::Active);
        // Validators were re-run against the restored draft
        assert!(resumed.is_valid(1));
        assert!(resumed.is_valid(2));
        assert_eq!(resumed.draft().as_value()["services"][0], "wash");
    }

    #[test]
    fn test_resume_rejects_foreign_snapshot() {
        let mut shell = active_shell();
        shell.merge_draft(json!({"step1_ok": true}));
        let mut snapshot = shell.temp_save().unwrap();
        snapshot.flow_id = FlowId("sell".to_string());

        match FlowShell::resume(four_step_definition(), snapshot) {
            Err(FlowError::ValidationError(msg)) => {
                assert!(msg.contains("belongs to flow"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_set_validity_applies_to_active_step() {
        let mut shell = active_shell();

        shell.set_validity(true);
        assert!(shell.is_valid(1));
        assert!(!shell.is_valid(2));
    }
}
